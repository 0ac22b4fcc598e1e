//! Finished spans and their transformation into ingest spans.

pub mod transform;
pub mod types;

pub use transform::{transform_span, OutputSpan};
pub use types::{InstrumentationLibrary, SpanKind, SpanRecord, SpanStatus, StatusCode};
