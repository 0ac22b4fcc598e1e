//! Finished span records.

use crate::core::{KeyValue, SpanId, TraceId};
use crate::metrics::Resource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a span in a trace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    /// No kind recorded
    #[default]
    Unspecified,
    /// Internal operation
    Internal,
    /// Handles a remote request
    Server,
    /// Issues a remote request
    Client,
    /// Enqueues a message
    Producer,
    /// Processes a message
    Consumer,
}

impl SpanKind {
    /// Lower-case wire name, `None` when unspecified
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            SpanKind::Unspecified => None,
            SpanKind::Internal => Some("internal"),
            SpanKind::Server => Some("server"),
            SpanKind::Client => Some("client"),
            SpanKind::Producer => Some("producer"),
            SpanKind::Consumer => Some("consumer"),
        }
    }
}

/// Status code of a finished span
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCode {
    /// No status recorded
    #[default]
    Unset,
    /// Completed successfully
    Ok,
    /// Completed with an error
    Error,
}

impl StatusCode {
    /// Wire name of the status code
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Unset => "Unset",
            StatusCode::Ok => "Ok",
            StatusCode::Error => "Error",
        }
    }
}

/// Status of a finished span
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpanStatus {
    /// Status code
    pub code: StatusCode,
    /// Status message
    pub description: String,
}

impl SpanStatus {
    /// An error status with a description
    pub fn error<S: Into<String>>(description: S) -> Self {
        Self {
            code: StatusCode::Error,
            description: description.into(),
        }
    }

    /// Returns true if the span status indicates an error
    pub fn is_error(&self) -> bool {
        self.code == StatusCode::Error
    }
}

/// Library that created the span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentationLibrary {
    /// Library name
    pub name: String,
    /// Library version
    #[serde(default)]
    pub version: Option<String>,
}

/// A finished span as handed over by the tracing pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanRecord {
    /// Trace the span belongs to
    pub trace_id: TraceId,
    /// Span id
    pub span_id: SpanId,
    /// Parent span, `None` for root spans
    #[serde(default)]
    pub parent_span_id: Option<SpanId>,
    /// Span name
    pub name: String,
    /// Span role
    #[serde(default)]
    pub kind: SpanKind,
    /// Start time
    pub start_time: DateTime<Utc>,
    /// End time
    pub end_time: DateTime<Utc>,
    /// Span attributes
    #[serde(default)]
    pub attributes: Vec<KeyValue>,
    /// Resource that produced the span
    #[serde(default)]
    pub resource: Resource,
    /// Completion status
    #[serde(default)]
    pub status: SpanStatus,
    /// Library that created the span
    #[serde(default)]
    pub instrumentation_library: Option<InstrumentationLibrary>,
}
