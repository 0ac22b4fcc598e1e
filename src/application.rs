//! Application wiring for one-shot export runs.

use crate::core::{Config, Result};
use crate::export::{ExportReport, Exporter, Sender};
use crate::input::RecordFile;
use std::path::Path;
use std::sync::Arc;

/// Coordinates configuration, the exporter and its sender.
pub struct Application {
    /// Exporter built from the configuration
    exporter: Exporter,
    /// Application configuration
    config: Config,
}

impl Application {
    /// Create a new Application with the given configuration and sender.
    pub fn new(config: Config, sender: Arc<dyn Sender>) -> Result<Self> {
        config.validate()?;
        let exporter = Exporter::new(config.exporter.clone(), sender)?;
        Ok(Self { exporter, config })
    }

    /// Export every record in a JSON record file, then shut the exporter down.
    ///
    /// Returns the metric and span reports.
    pub async fn run_file(&self, path: &Path) -> Result<(ExportReport, ExportReport)> {
        let content = tokio::fs::read_to_string(path).await?;
        let file = RecordFile::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            metrics = file.metrics.len(),
            spans = file.spans.len(),
            "Loaded record file"
        );

        let result = self.run(&file).await;
        self.exporter.shutdown();
        result
    }

    /// Export the records of an already parsed file.
    pub async fn run(&self, file: &RecordFile) -> Result<(ExportReport, ExportReport)> {
        let records = file.aggregation_records()?;
        let metrics = self.exporter.export_metrics(&records).await?;
        let spans = self.exporter.export_spans(&file.spans).await?;

        tracing::info!(
            service = %self.exporter.service_name(),
            metrics_exported = metrics.exported,
            metrics_skipped = metrics.skipped,
            spans_exported = spans.exported,
            "Export cycle complete"
        );

        Ok((metrics, spans))
    }

    /// Get a reference to the exporter.
    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}
