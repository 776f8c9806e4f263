use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::SalesMirror;
use crate::models::MirroredSale;

/// 镜像事件
#[derive(Debug, Clone)]
pub enum MirrorEvent {
    Append(MirroredSale),
    Clear,
}

/// 镜像转发句柄：发送事件，不等待写入结果
#[derive(Debug, Clone)]
pub struct MirrorHandle {
    tx: mpsc::UnboundedSender<MirrorEvent>,
    failures: Arc<AtomicU64>,
}

impl MirrorHandle {
    /// 投递事件，转发任务已停止时仅记录日志
    pub fn send(&self, event: MirrorEvent) {
        if let Err(e) = self.tx.send(event) {
            self.failures.fetch_add(1, Ordering::Relaxed);
            tracing::warn!("Mirror forwarder stopped, dropping event: {:?}", e.0);
        }
    }

    /// 累计失败次数
    pub fn failed_writes(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

/// 后台转发任务，逐个把事件写入镜像文件
pub struct MirrorForwarder {
    task: JoinHandle<()>,
}

impl MirrorForwarder {
    pub fn spawn(mirror: Arc<SalesMirror>) -> (MirrorHandle, Self) {
        let (tx, mut rx) = mpsc::unbounded_channel::<MirrorEvent>();
        let failures = Arc::new(AtomicU64::new(0));
        let task_failures = failures.clone();

        let task = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let result = match &event {
                    MirrorEvent::Append(sale) => mirror.append(sale.clone()).await,
                    MirrorEvent::Clear => mirror.clear().await,
                };
                if let Err(e) = result {
                    task_failures.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!("Mirror write failed for {:?}: {}", event, e);
                }
            }
            tracing::debug!("Mirror forwarder drained");
        });

        (MirrorHandle { tx, failures }, Self { task })
    }

    /// 等待所有事件写完；调用前需丢弃全部 MirrorHandle
    pub async fn shutdown(self) {
        if let Err(e) = self.task.await {
            tracing::error!("Mirror forwarder panicked: {}", e);
        }
    }
}
