//! Span transformer.

use crate::core::attributes::{
    AttributeMap, AttributeValue, COLLECTOR_NAME_KEY, COLLECTOR_NAME_VALUE,
    INSTRUMENTATION_PROVIDER_KEY, INSTRUMENTATION_PROVIDER_VALUE, SERVICE_NAME_KEY,
};
use crate::core::{ServiceName, SpanId, TraceId};
use crate::trace::types::{SpanRecord, StatusCode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Upper bound on attributes the transformer adds to a span.
const SPAN_METADATA_KEYS: usize = 7;

/// One transformed span.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSpan {
    /// Span id
    pub id: SpanId,
    /// Trace id
    pub trace_id: TraceId,
    /// Span start
    pub timestamp: DateTime<Utc>,
    /// Span duration
    pub duration: Duration,
    /// Reported `service.name`
    pub service_name: String,
    /// Span name
    pub name: String,
    /// Parent span, `None` for root spans
    pub parent_id: Option<SpanId>,
    /// Span attributes
    pub attributes: AttributeMap,
}

impl OutputSpan {
    /// Keys the wire form fills from span fields; these override attributes.
    fn writes_key(&self, key: &str) -> bool {
        match key {
            "name" | "duration.ms" | SERVICE_NAME_KEY => true,
            "parent.id" => self.parent_id.is_some(),
            _ => false,
        }
    }
}

/// Wire form: the span identity at the top level, everything else under
/// `attributes`.
impl Serialize for OutputSpan {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeStruct};

        struct WireAttributes<'a>(&'a OutputSpan);

        impl Serialize for WireAttributes<'_> {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let span = self.0;
                let mut map = serializer.serialize_map(None)?;
                for (key, value) in span.attributes.iter() {
                    if !span.writes_key(key) {
                        map.serialize_entry(key, value)?;
                    }
                }
                map.serialize_entry("name", &span.name)?;
                if let Some(parent) = &span.parent_id {
                    map.serialize_entry("parent.id", parent.as_str())?;
                }
                map.serialize_entry("duration.ms", &(span.duration.as_secs_f64() * 1000.0))?;
                map.serialize_entry(SERVICE_NAME_KEY, &span.service_name)?;
                map.end()
            }
        }

        let mut state = serializer.serialize_struct("Span", 4)?;
        state.serialize_field("id", self.id.as_str())?;
        state.serialize_field("trace.id", self.trace_id.as_str())?;
        state.serialize_field("timestamp", &self.timestamp.timestamp_millis())?;
        state.serialize_field("attributes", &WireAttributes(self))?;
        state.end()
    }
}

/// Transform a finished span.
///
/// A `service.name` string on the span's resource takes precedence over the
/// exporter's own service name.
pub fn transform_span(service: &ServiceName, span: &SpanRecord) -> OutputSpan {
    let service_name = match span.resource.get(SERVICE_NAME_KEY) {
        Some(AttributeValue::String(name)) if !name.is_empty() => name.clone(),
        _ => service.as_str().to_owned(),
    };

    let mut attrs =
        AttributeMap::builder(span.resource.len() + span.attributes.len() + SPAN_METADATA_KEYS);
    attrs.extend(span.resource.iter()).extend(span.attributes.iter());

    if let Some(kind) = span.kind.as_str() {
        attrs.insert("span.kind", kind);
    }

    if span.status.code != StatusCode::Unset {
        attrs
            .insert("otel.status_code", span.status.code.as_str())
            .insert("otel.status_description", span.status.description.as_str());
    }
    if span.status.is_error() {
        attrs.insert("error", true);
    }

    if let Some(library) = &span.instrumentation_library {
        attrs.insert("otel.library.name", library.name.as_str());
        if let Some(version) = &library.version {
            attrs.insert("otel.library.version", version.as_str());
        }
    }

    attrs
        .insert(INSTRUMENTATION_PROVIDER_KEY, INSTRUMENTATION_PROVIDER_VALUE)
        .insert(COLLECTOR_NAME_KEY, COLLECTOR_NAME_VALUE);

    let duration = (span.end_time - span.start_time)
        .to_std()
        .unwrap_or(Duration::ZERO);

    OutputSpan {
        id: span.span_id.clone(),
        trace_id: span.trace_id.clone(),
        timestamp: span.start_time,
        duration,
        service_name,
        name: span.name.clone(),
        parent_id: span.parent_span_id.clone(),
        attributes: attrs.build(),
    }
}
