//! Export glue between the transformers and a transport.
//!
//! The [`Exporter`] runs one export cycle: it transforms every record,
//! applies the configured [`ErrorPolicy`] to failures and hands the batch to a
//! [`Sender`]. Transport, authentication and retry belong to the sender.

pub mod batch;
pub mod sender;

pub use batch::{MetricBatch, MetricCommon, SpanBatch};
pub use sender::{MemorySender, StdoutSender};

use crate::core::config::ExporterConfig;
use crate::core::{ErrorPolicy, ExporterError, Result, ServiceName};
use crate::metrics::{transform, AggregationRecord};
use crate::trace::{transform_span, SpanRecord};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Destination for transformed batches.
#[async_trait]
pub trait Sender: Send + Sync {
    /// Deliver one metric batch
    async fn send_metrics(&self, batch: MetricBatch) -> Result<()>;

    /// Deliver one span batch
    async fn send_spans(&self, batch: SpanBatch) -> Result<()>;
}

/// Outcome of one export cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Items handed to the sender
    pub exported: usize,
    /// Records dropped by the skip policy
    pub skipped: usize,
}

/// Transforms records and forwards them to a [`Sender`].
pub struct Exporter {
    service: ServiceName,
    config: ExporterConfig,
    sender: Arc<dyn Sender>,
    shut_down: AtomicBool,
}

impl Exporter {
    /// Create a new exporter.
    ///
    /// Fails if the configured service name is empty.
    pub fn new(config: ExporterConfig, sender: Arc<dyn Sender>) -> Result<Self> {
        let service = ServiceName::new(config.service_name.as_str())?;
        Ok(Self {
            service,
            config,
            sender,
            shut_down: AtomicBool::new(false),
        })
    }

    /// Service name attached to exported data
    pub fn service_name(&self) -> &ServiceName {
        &self.service
    }

    /// Transform and send one cycle of aggregation records.
    ///
    /// Each record transforms independently. With [`ErrorPolicy::Skip`] a
    /// failing record is logged and left out of the batch; with
    /// [`ErrorPolicy::Abort`] the first failure is returned and nothing is
    /// sent. An empty batch is not sent.
    pub async fn export_metrics(&self, records: &[AggregationRecord]) -> Result<ExportReport> {
        self.ensure_running()?;

        let mut metrics = Vec::with_capacity(records.len());
        let mut skipped = 0;

        for record in records {
            match transform(&self.service, record) {
                Ok(metric) => metrics.push(metric),
                Err(e) if self.config.on_error == ErrorPolicy::Abort => {
                    tracing::error!(
                        metric = record.descriptor().name(),
                        error = %e,
                        "Aborting metric export"
                    );
                    return Err(e.into());
                },
                Err(e) => {
                    tracing::warn!(
                        metric = record.descriptor().name(),
                        aggregator = record.aggregator().kind(),
                        error = %e,
                        "Skipping metric record"
                    );
                    skipped += 1;
                },
            }
        }

        if metrics.is_empty() {
            tracing::debug!(skipped, "No metrics to export");
            return Ok(ExportReport { exported: 0, skipped });
        }

        let batch = MetricBatch {
            common: MetricCommon {
                timestamp: Utc::now(),
                interval: self.config.harvest_interval,
                attributes: self.config.common_attributes.clone(),
            },
            metrics,
        };
        let exported = batch.len();

        self.sender.send_metrics(batch).await?;
        tracing::debug!(exported, skipped, "Sent metric batch");

        Ok(ExportReport { exported, skipped })
    }

    /// Transform and send one cycle of finished spans.
    pub async fn export_spans(&self, spans: &[SpanRecord]) -> Result<ExportReport> {
        self.ensure_running()?;

        if spans.is_empty() {
            return Ok(ExportReport::default());
        }

        let batch = SpanBatch {
            common_attributes: self.config.common_attributes.clone(),
            spans: spans.iter().map(|span| transform_span(&self.service, span)).collect(),
        };
        let exported = batch.len();

        self.sender.send_spans(batch).await?;
        tracing::debug!(exported, "Sent span batch");

        Ok(ExportReport { exported, skipped: 0 })
    }

    /// Stop accepting exports. Calling this more than once is harmless.
    pub fn shutdown(&self) {
        if !self.shut_down.swap(true, Ordering::AcqRel) {
            tracing::info!(service = %self.service, "Exporter shut down");
        }
    }

    /// Returns true once [`shutdown`](Self::shutdown) has been called
    pub fn is_shutdown(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }

    fn ensure_running(&self) -> Result<()> {
        if self.is_shutdown() {
            Err(ExporterError::Shutdown)
        } else {
            Ok(())
        }
    }
}
