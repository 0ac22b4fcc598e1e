//! Error types for nrexport.

use crate::metrics::TransformError;
use thiserror::Error;

/// Errors raised by the export glue, configuration and input handling
#[derive(Error, Debug)]
pub enum ExporterError {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed input record
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A record failed to transform
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// The sender failed to deliver a batch
    #[error("Send error: {0}")]
    Send(String),

    /// Export attempted after shutdown
    #[error("Exporter has been shut down")]
    Shutdown,

    /// Filesystem or stdout failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML config parse failure
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for exporter operations
pub type Result<T> = std::result::Result<T, ExporterError>;

impl ExporterError {
    /// Creates a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a new send error
    pub fn send<S: Into<String>>(msg: S) -> Self {
        Self::Send(msg.into())
    }

    /// Creates a new invalid record error
    pub fn invalid_record<S: Into<String>>(msg: S) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// Returns true if this error is recoverable
    ///
    /// Only sender failures qualify: a transform failure is a property of the
    /// record and will fail the same way on every attempt.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Send(_))
    }

    /// Returns the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::InvalidRecord(_) => "validation",
            Self::Transform(_) => "transform",
            Self::Send(_) => "send",
            Self::Shutdown => "lifecycle",
            Self::Io(_) => "io",
            Self::Serialization(_) | Self::Yaml(_) => "serialization",
        }
    }
}
