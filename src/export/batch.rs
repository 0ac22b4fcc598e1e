//! Wire payloads handed to a [`Sender`](super::Sender).

use crate::core::AttributeValue;
use crate::metrics::OutputMetric;
use crate::trace::OutputSpan;
use chrono::{DateTime, Utc};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::time::Duration;

/// Attributes and timing shared by every metric in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCommon {
    /// Harvest time, sent in milliseconds
    pub timestamp: DateTime<Utc>,
    /// Harvest interval, sent as `interval.ms`
    pub interval: Duration,
    /// Attributes shared by every metric
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Serialize for MetricCommon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("MetricCommon", 3)?;
        state.serialize_field("timestamp", &self.timestamp.timestamp_millis())?;
        state.serialize_field("interval.ms", &(self.interval.as_millis() as u64))?;
        state.serialize_field("attributes", &self.attributes)?;
        state.end()
    }
}

#[derive(Serialize)]
struct MetricGroup<'a> {
    common: &'a MetricCommon,
    metrics: &'a [OutputMetric],
}

/// One harvest worth of metrics.
///
/// Serializes as `[{"common": {...}, "metrics": [...]}]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricBatch {
    /// Shared block
    pub common: MetricCommon,
    /// Transformed metrics
    pub metrics: Vec<OutputMetric>,
}

impl MetricBatch {
    /// Number of metrics in the batch
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Returns true if the batch carries no metrics
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl Serialize for MetricBatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(1))?;
        seq.serialize_element(&MetricGroup {
            common: &self.common,
            metrics: &self.metrics,
        })?;
        seq.end()
    }
}

#[derive(Serialize)]
struct SpanCommon<'a> {
    attributes: &'a BTreeMap<String, AttributeValue>,
}

#[derive(Serialize)]
struct SpanGroup<'a> {
    common: SpanCommon<'a>,
    spans: &'a [OutputSpan],
}

/// One harvest worth of spans.
///
/// Serializes as `[{"common": {"attributes": {...}}, "spans": [...]}]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanBatch {
    /// Attributes shared by every span
    pub common_attributes: BTreeMap<String, AttributeValue>,
    /// Transformed spans
    pub spans: Vec<OutputSpan>,
}

impl SpanBatch {
    /// Number of spans in the batch
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns true if the batch carries no spans
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

impl Serialize for SpanBatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(1))?;
        seq.serialize_element(&SpanGroup {
            common: SpanCommon {
                attributes: &self.common_attributes,
            },
            spans: &self.spans,
        })?;
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AttributeMap;
    use crate::metrics::Count;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_metric_batch_wire_shape() {
        let mut attributes = BTreeMap::new();
        attributes.insert("host.name".to_string(), AttributeValue::from("web-1"));

        let batch = MetricBatch {
            common: MetricCommon {
                timestamp: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
                interval: Duration::from_secs(5),
                attributes,
            },
            metrics: vec![OutputMetric::Count(Count {
                name: "requests".to_string(),
                value: 1.0,
                attributes: AttributeMap::default(),
            })],
        };

        assert_eq!(
            serde_json::to_value(&batch).unwrap(),
            json!([{
                "common": {
                    "timestamp": 1_700_000_000_000_i64,
                    "interval.ms": 5000,
                    "attributes": {"host.name": "web-1"}
                },
                "metrics": [
                    {"type": "count", "name": "requests", "value": 1.0, "attributes": {}}
                ]
            }])
        );
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_empty_span_batch_wire_shape() {
        let batch = SpanBatch {
            common_attributes: BTreeMap::new(),
            spans: Vec::new(),
        };

        assert!(batch.is_empty());
        assert_eq!(
            serde_json::to_value(&batch).unwrap(),
            json!([{"common": {"attributes": {}}, "spans": []}])
        );
    }
}
