use uuid::Uuid;

use crate::models::{CellValue, InventoryItem, RawRow, DEFAULT_CATEGORY};

/// 各逻辑字段的候选列名 (按优先级) 及兜底列位置
#[derive(Debug, Clone)]
pub struct ColumnAliases {
    pub name: &'static [&'static str],
    pub quantity: &'static [&'static str],
    pub price: &'static [&'static str],
    pub id: &'static [&'static str],
}

impl ColumnAliases {
    pub const NAME_COLUMN: usize = 0;
    pub const QUANTITY_COLUMN: usize = 1;
    pub const PRICE_COLUMN: usize = 2;
    pub const ID_COLUMN: usize = 3;
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            name: &["name", "Name", "productName", "ProductName", "description", "Description"],
            quantity: &["quantity", "Quantity", "qty", "Qty", "quantityInStock", "QuantityInStock"],
            price: &["price", "Price", "sellingPrice", "SellingPrice", "sell", "Sell"],
            id: &["id", "ID", "Id", "productId", "ProductId"],
        }
    }
}

/// 表格行 -> 库存商品
///
/// 先按列名优先级取值，找不到再按列位置取值。列顺序与预期不符时结果不可靠，
/// 单行数据异常只会得到默认值，不会让整批上传失败。
#[derive(Debug, Clone, Default)]
pub struct RowMapper {
    aliases: ColumnAliases,
}

impl RowMapper {
    pub fn new(aliases: ColumnAliases) -> Self {
        Self { aliases }
    }

    /// 过滤空行后逐行映射
    pub fn map_rows(&self, rows: &[RawRow]) -> Vec<InventoryItem> {
        rows.iter()
            .filter(|row| row.values().any(CellValue::is_present))
            .map(|row| self.map_row(row))
            .collect()
    }

    pub fn map_row(&self, row: &RawRow) -> InventoryItem {
        let name = resolve(row, self.aliases.name, ColumnAliases::NAME_COLUMN)
            .map(|c| c.to_text().trim().to_string())
            .unwrap_or_default();

        let quantity = resolve(row, self.aliases.quantity, ColumnAliases::QUANTITY_COLUMN)
            .filter(|c| c.is_present())
            .and_then(parse_quantity)
            .unwrap_or(1)
            .max(0);

        let price = resolve(row, self.aliases.price, ColumnAliases::PRICE_COLUMN)
            .filter(|c| c.is_present())
            .and_then(parse_price)
            .unwrap_or(0.0);

        let id = resolve(row, self.aliases.id, ColumnAliases::ID_COLUMN)
            .filter(|c| c.is_present())
            .map(|c| c.to_text().trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        InventoryItem {
            id,
            name,
            category: DEFAULT_CATEGORY.to_string(),
            price,
            cost: None,
            quantity,
        }
    }
}

/// 第一个有值的候选列，否则取指定位置的列
fn resolve<'a>(row: &'a RawRow, aliases: &[&str], position: usize) -> Option<&'a CellValue> {
    aliases
        .iter()
        .filter_map(|alias| row.get(*alias))
        .find(|cell| cell.is_present())
        .or_else(|| row.get_index(position).map(|(_, cell)| cell))
}

fn parse_quantity(cell: &CellValue) -> Option<i64> {
    match cell {
        CellValue::Number(n) if n.is_finite() => Some(n.trunc() as i64),
        CellValue::Text(s) => parse_int_prefix(s),
        CellValue::Bool(_) | CellValue::Number(_) | CellValue::Empty => None,
    }
}

fn parse_price(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(n) if n.is_finite() => Some(*n),
        CellValue::Text(s) => parse_float_prefix(s),
        CellValue::Bool(_) | CellValue::Number(_) | CellValue::Empty => None,
    }
}

/// 解析开头的整数部分，如 "12 pcs" -> 12
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

/// 解析开头的小数部分，如 "9.99 EUR" -> 9.99
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        let mut frac_digits = 0;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
            frac_digits += 1;
        }
        if digits + frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }
    if digits == 0 {
        return None;
    }

    // 指数部分必须完整才纳入
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn row(cells: &[(&str, CellValue)]) -> RawRow {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_bear_row() {
        let mapper = RowMapper::default();
        let item = mapper.map_row(&row(&[
            ("name", "Bear".into()),
            ("quantity", "3".into()),
            ("price", "9.99".into()),
        ]));
        assert_eq!(item.name, "Bear");
        assert_eq!(item.quantity, 3);
        assert_eq!(item.price, 9.99);
        assert_eq!(item.category, "Uncategorized");
        assert_eq!(item.cost, None);
        assert!(Uuid::parse_str(&item.id).is_ok());
    }

    #[test]
    fn test_alias_priority() {
        let mapper = RowMapper::default();
        let item = mapper.map_row(&row(&[
            ("Description", "Long text".into()),
            ("ProductName", "Fox".into()),
            ("Qty", "4".into()),
            ("SellingPrice", "12.50".into()),
            ("ProductId", " sku-9 ".into()),
        ]));
        assert_eq!(item.name, "Fox");
        assert_eq!(item.quantity, 4);
        assert_eq!(item.price, 12.5);
        assert_eq!(item.id, "sku-9");
    }

    #[test]
    fn test_positional_fallback() {
        let mapper = RowMapper::default();
        let item = mapper.map_row(&row(&[
            ("Artikel", "  Owl ".into()),
            ("Anzahl", "2".into()),
            ("Preis", "7".into()),
            ("Nummer", CellValue::Number(42.0)),
        ]));
        assert_eq!(item.name, "Owl");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.price, 7.0);
        assert_eq!(item.id, "42");
    }

    #[test]
    fn test_defaults_for_missing_and_garbage() {
        let mapper = RowMapper::default();
        let item = mapper.map_row(&row(&[
            ("name", "Cat".into()),
            ("quantity", "lots".into()),
            ("price", "free".into()),
        ]));
        assert_eq!(item.quantity, 1);
        assert_eq!(item.price, 0.0);

        let item = mapper.map_row(&row(&[("name", "Dog".into())]));
        assert_eq!(item.quantity, 1);
        assert_eq!(item.price, 0.0);
    }

    #[test]
    fn test_numeric_zero_quantity_falls_back_to_default() {
        let mapper = RowMapper::default();
        let item = mapper.map_row(&row(&[
            ("name", "Cat".into()),
            ("quantity", CellValue::Number(0.0)),
            ("price", CellValue::Number(3.5)),
        ]));
        assert_eq!(item.quantity, 1);
        assert_eq!(item.price, 3.5);
    }

    #[test]
    fn test_negative_quantity_clamps_to_zero() {
        let mapper = RowMapper::default();
        let item = mapper.map_row(&row(&[("name", "Cat".into()), ("quantity", "-4".into())]));
        assert_eq!(item.quantity, 0);
    }

    #[test]
    fn test_empty_rows_filtered_and_ids_unique() {
        let mapper = RowMapper::default();
        let mut rows = vec![row(&[("name", "".into()), ("quantity", CellValue::Empty)])];
        for i in 0..500 {
            rows.push(row(&[("name", format!("Item {}", i).as_str().into())]));
        }

        let items = mapper.map_rows(&rows);
        assert_eq!(items.len(), 500);
        let ids: HashSet<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_prefix_parsers() {
        assert_eq!(parse_int_prefix("12 pcs"), Some(12));
        assert_eq!(parse_int_prefix("3.7"), Some(3));
        assert_eq!(parse_int_prefix(" -2"), Some(-2));
        assert_eq!(parse_int_prefix("x1"), None);
        assert_eq!(parse_float_prefix("9.99 EUR"), Some(9.99));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("1e3"), Some(1000.0));
        assert_eq!(parse_float_prefix("2e"), Some(2.0));
        assert_eq!(parse_float_prefix("-."), None);
        assert_eq!(parse_float_prefix("$5"), None);
    }
}
