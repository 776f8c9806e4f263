use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;
use std::path::Path;

use crate::error::UploadError;
use crate::models::{CellValue, RawRow};

/// 支持的上传格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Csv,
    Workbook,
}

impl UploadFormat {
    /// 按扩展名判断 (不区分大小写)
    pub fn from_filename(filename: &str) -> Result<Self, UploadError> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(UploadFormat::Csv),
            "xls" | "xlsx" => Ok(UploadFormat::Workbook),
            _ => Err(UploadError::UnsupportedFileType(if ext.is_empty() {
                filename.to_string()
            } else {
                ext
            })),
        }
    }
}

/// 解析上传文件为表格行 (首行为表头)
pub fn parse_rows(filename: &str, data: &[u8]) -> Result<Vec<RawRow>, UploadError> {
    match UploadFormat::from_filename(filename)? {
        UploadFormat::Csv => parse_csv(data),
        UploadFormat::Workbook => parse_workbook(data),
    }
}

/// CSV: 跳过空行，容忍列数不一致
pub fn parse_csv(data: &[u8]) -> Result<Vec<RawRow>, UploadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), CellValue::from(value)))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Excel: 只读第一个工作表，空单元格不进入行数据
pub fn parse_workbook(data: &[u8]) -> Result<Vec<RawRow>, UploadError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(data.to_vec()))?;
    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return Ok(Vec::new());
    };
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut sheet_rows = range.rows();
    let Some(header_cells) = sheet_rows.next() else {
        return Ok(Vec::new());
    };
    let headers = header_names(header_cells);

    let mut rows = Vec::new();
    for cells in sheet_rows {
        let row: RawRow = headers
            .iter()
            .zip(cells.iter())
            .map(|(header, cell)| (header.clone(), cell_to_value(cell)))
            .filter(|(_, value)| *value != CellValue::Empty)
            .collect();
        if !row.is_empty() {
            rows.push(row);
        }
    }
    tracing::debug!("Sheet {} parsed, {} rows", sheet_name, rows.len());
    Ok(rows)
}

/// 表头去重，空表头命名为 __EMPTY, __EMPTY_1 ...
fn header_names(cells: &[Data]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(cells.len());
    for cell in cells {
        let base = match cell_to_value(cell) {
            CellValue::Empty => "__EMPTY".to_string(),
            value => value.to_text(),
        };
        let mut name = base.clone();
        let mut suffix = 1;
        while names.contains(&name) {
            name = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        names.push(name);
    }
    names
}

fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(v) => CellValue::Text(v.to_string()),
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::DateTime(v) => CellValue::Number(v.as_f64()),
        Data::DateTimeIso(v) => CellValue::Text(v.to_string()),
        Data::DurationIso(v) => CellValue::Text(v.to_string()),
        Data::Error(v) => CellValue::Text(v.to_string()),
        Data::Empty => CellValue::Empty,
    }
}
