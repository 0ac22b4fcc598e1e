//! Built-in [`Sender`] implementations.

use super::batch::{MetricBatch, SpanBatch};
use super::Sender;
use crate::core::Result;
use async_trait::async_trait;
use std::io::Write;
use tokio::sync::Mutex;

/// Writes every batch to stdout as one line of JSON.
#[derive(Debug, Default)]
pub struct StdoutSender;

impl StdoutSender {
    /// Create a new stdout sender
    pub fn new() -> Self {
        Self
    }

    fn write_line<T: serde::Serialize>(payload: &T) -> Result<()> {
        let json = serde_json::to_string(payload)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", json)?;
        Ok(())
    }
}

#[async_trait]
impl Sender for StdoutSender {
    async fn send_metrics(&self, batch: MetricBatch) -> Result<()> {
        Self::write_line(&batch)
    }

    async fn send_spans(&self, batch: SpanBatch) -> Result<()> {
        Self::write_line(&batch)
    }
}

/// Keeps every batch in memory.
#[derive(Debug, Default)]
pub struct MemorySender {
    metrics: Mutex<Vec<MetricBatch>>,
    spans: Mutex<Vec<SpanBatch>>,
}

impl MemorySender {
    /// Create an empty memory sender
    pub fn new() -> Self {
        Self::default()
    }

    /// Metric batches received so far
    pub async fn metric_batches(&self) -> Vec<MetricBatch> {
        self.metrics.lock().await.clone()
    }

    /// Span batches received so far
    pub async fn span_batches(&self) -> Vec<SpanBatch> {
        self.spans.lock().await.clone()
    }
}

#[async_trait]
impl Sender for MemorySender {
    async fn send_metrics(&self, batch: MetricBatch) -> Result<()> {
        self.metrics.lock().await.push(batch);
        Ok(())
    }

    async fn send_spans(&self, batch: SpanBatch) -> Result<()> {
        self.spans.lock().await.push(batch);
        Ok(())
    }
}
