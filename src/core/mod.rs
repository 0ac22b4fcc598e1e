//! Core domain types shared by the transform layer and the export glue.
//!
//! Attribute values, identifiers, configuration and errors live here.

#![warn(missing_docs)]

pub mod attributes;
pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use attributes::{AttributeMap, AttributeMapBuilder, AttributeValue, KeyValue};
pub use config::{Config, ConfigBuilder, ErrorPolicy, LogLevel};
pub use error::{ExporterError, Result};
pub use types::{ServiceName, SpanId, TraceId};
