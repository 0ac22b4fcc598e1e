//! Validated identifier newtypes.

use crate::core::error::{ExporterError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a trace (32 lowercase hex characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TraceId(String);

/// Unique identifier for a span within a trace (16 lowercase hex characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpanId(String);

/// Name of the process reporting telemetry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceName(String);

fn validate_hex_id(kind: &str, id: &str, len: usize) -> Result<()> {
    if id.len() != len {
        return Err(ExporterError::invalid_record(format!(
            "{kind} must be {len} hex characters, got {}",
            id.len()
        )));
    }
    if !id.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ExporterError::invalid_record(format!("{kind} is not hex: {id}")));
    }
    // All-zero identifiers are invalid in OTEL
    if id.bytes().all(|b| b == b'0') {
        return Err(ExporterError::invalid_record(format!("{kind} cannot be all zeros")));
    }
    Ok(())
}

impl TraceId {
    /// Creates a new TraceId after validation
    pub fn new<S: Into<String>>(id: S) -> Result<Self> {
        let id = id.into().to_ascii_lowercase();
        validate_hex_id("TraceId", &id, 32)?;
        Ok(TraceId(id))
    }

    /// Returns the string representation of the trace ID
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl SpanId {
    /// Creates a new SpanId after validation
    pub fn new<S: Into<String>>(id: S) -> Result<Self> {
        let id = id.into().to_ascii_lowercase();
        validate_hex_id("SpanId", &id, 16)?;
        Ok(SpanId(id))
    }

    /// Returns the string representation of the span ID
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ServiceName {
    /// Creates a new ServiceName after validation
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ExporterError::config("ServiceName cannot be empty"));
        }
        Ok(ServiceName(name))
    }

    /// Returns the string representation of the service name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! string_newtype_conversions {
    ($ty:ident) => {
        impl TryFrom<String> for $ty {
            type Error = ExporterError;

            fn try_from(value: String) -> Result<Self> {
                $ty::new(value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }
    };
}

string_newtype_conversions!(TraceId);
string_newtype_conversions!(SpanId);
string_newtype_conversions!(ServiceName);
