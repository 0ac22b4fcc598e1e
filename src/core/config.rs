//! Configuration management for nrexport.
//!
//! This module provides configuration handling with:
//! - YAML file support
//! - CLI argument overrides
//! - Validation and defaults

use crate::core::attributes::AttributeValue;
use crate::core::{ExporterError, Result, ServiceName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Complete configuration for nrexport
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Exporter configuration
    pub exporter: ExporterConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Debug mode
    #[serde(skip)]
    pub debug: bool,
}

/// Exporter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExporterConfig {
    /// Service name attached to every metric as `service.name`
    pub service_name: String,
    /// Interval between harvests, reported as `interval.ms`
    #[serde(with = "humantime_serde")]
    pub harvest_interval: Duration,
    /// What to do with a record that fails to transform
    pub on_error: ErrorPolicy,
    /// Attributes placed in the `common` block of every batch
    pub common_attributes: BTreeMap<String, AttributeValue>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,
}

/// Per-record failure handling in the export loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log the failure and export the remaining records
    Skip,
    /// Fail the whole batch
    Abort,
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Diagnostics
    Debug,
    /// Lifecycle events
    Info,
    /// Skipped records and recoverable problems
    Warn,
    /// Failures only
    Error,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        ExporterConfig {
            service_name: "unknown_service".to_string(),
            harvest_interval: Duration::from_secs(5),
            on_error: ErrorPolicy::Skip,
            common_attributes: BTreeMap::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Result<Self> {
        let config = Config::default();
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.exporter.service_name.is_empty() {
            return Err(ExporterError::config("service_name must not be empty"));
        }

        if self.exporter.harvest_interval.is_zero() {
            return Err(ExporterError::config("harvest_interval must be greater than 0"));
        }

        if self.exporter.common_attributes.keys().any(String::is_empty) {
            return Err(ExporterError::config("common_attributes keys must not be empty"));
        }

        Ok(())
    }

    /// The validated service name
    pub fn service_name(&self) -> Result<ServiceName> {
        ServiceName::new(self.exporter.service_name.as_str())
    }
}

impl LogLevel {
    /// Convert to tracing filter string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Configuration builder for programmatic construction
pub struct ConfigBuilder {
    config: Config,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        ConfigBuilder {
            config: Config::default(),
        }
    }

    /// Load configuration from YAML string
    pub fn from_yaml(mut self, yaml: &str) -> Result<Self> {
        self.config = serde_yaml::from_str(yaml)?;
        Ok(self)
    }

    /// Set service name
    pub fn service_name<S: Into<String>>(mut self, name: S) -> Self {
        self.config.exporter.service_name = name.into();
        self
    }

    /// Set harvest interval
    pub fn harvest_interval(mut self, interval: Duration) -> Self {
        self.config.exporter.harvest_interval = interval;
        self
    }

    /// Set error policy
    pub fn on_error(mut self, policy: ErrorPolicy) -> Self {
        self.config.exporter.on_error = policy;
        self
    }

    /// Add a common attribute
    pub fn common_attribute<K: Into<String>, V: Into<AttributeValue>>(mut self, key: K, value: V) -> Self {
        self.config
            .exporter
            .common_attributes
            .insert(key.into(), value.into());
        self
    }

    /// Set log level
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set debug mode
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
