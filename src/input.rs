//! JSON record files for offline export runs.
//!
//! ```json
//! {
//!   "metrics": [
//!     {"name": "requests.count", "unit": "1", "number_kind": "int64",
//!      "labels": [{"key": "A", "value": "1"}],
//!      "aggregation": {"type": "sum", "value": 42}}
//!   ],
//!   "spans": []
//! }
//! ```

use crate::core::{ExporterError, Result};
use crate::metrics::{
    AggregationRecord, Aggregator, Descriptor, Labels, MinMaxSumCountSnapshot, Number, NumberKind,
    Resource, SumSnapshot,
};
use crate::trace::SpanRecord;
use serde::Deserialize;

/// Contents of one record file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecordFile {
    /// Aggregation records
    pub metrics: Vec<MetricInput>,
    /// Finished spans
    pub spans: Vec<SpanRecord>,
}

/// One aggregation record as written in a record file.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricInput {
    /// Instrument name
    pub name: String,
    /// Instrument unit
    #[serde(default)]
    pub unit: String,
    /// Instrument description
    #[serde(default)]
    pub description: String,
    /// Interpretation of the aggregation numbers
    pub number_kind: NumberKind,
    /// Resource attributes
    #[serde(default)]
    pub resource: Resource,
    /// Series labels
    #[serde(default)]
    pub labels: Labels,
    /// Aggregation object tagged by `type`
    pub aggregation: serde_json::Value,
}

#[derive(Deserialize)]
struct SumInput {
    #[serde(default)]
    value: Option<serde_json::Number>,
}

#[derive(Deserialize)]
struct MinMaxSumCountInput {
    #[serde(default)]
    min: Option<serde_json::Number>,
    #[serde(default)]
    max: Option<serde_json::Number>,
    #[serde(default)]
    sum: Option<serde_json::Number>,
    #[serde(default)]
    count: Option<u64>,
}

impl RecordFile {
    /// Parse a record file from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build aggregation records, failing on the first malformed entry
    pub fn aggregation_records(&self) -> Result<Vec<AggregationRecord>> {
        self.metrics.iter().map(MetricInput::to_record).collect()
    }
}

impl MetricInput {
    /// Build the aggregation record this entry describes.
    ///
    /// Missing statistics are kept missing so the aggregator reports them as
    /// unavailable at transform time.
    pub fn to_record(&self) -> Result<AggregationRecord> {
        if self.name.is_empty() {
            return Err(ExporterError::invalid_record("metric name must not be empty"));
        }

        let descriptor = Descriptor::new(self.name.as_str(), self.number_kind)
            .with_unit(self.unit.as_str())
            .with_description(self.description.as_str())
            .with_resource(self.resource.clone());

        Ok(AggregationRecord::new(descriptor, self.labels.clone(), self.aggregator()?))
    }

    fn aggregator(&self) -> Result<Aggregator> {
        let kind = self
            .aggregation
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| {
                ExporterError::invalid_record(format!("{}: aggregation type missing", self.name))
            })?;

        match kind {
            "sum" => {
                let input: SumInput = serde_json::from_value(self.aggregation.clone())?;
                Ok(Aggregator::Sum(Box::new(SumSnapshot {
                    value: self.number(input.value.as_ref())?,
                })))
            },
            "min_max_sum_count" => {
                let input: MinMaxSumCountInput = serde_json::from_value(self.aggregation.clone())?;
                Ok(Aggregator::MinMaxSumCount(Box::new(MinMaxSumCountSnapshot {
                    min: self.number(input.min.as_ref())?,
                    max: self.number(input.max.as_ref())?,
                    sum: self.number(input.sum.as_ref())?,
                    count: input.count,
                })))
            },
            other => Ok(Aggregator::unsupported(other)),
        }
    }

    fn number(&self, value: Option<&serde_json::Number>) -> Result<Option<Number>> {
        let Some(value) = value else {
            return Ok(None);
        };

        let number = match self.number_kind {
            NumberKind::Int64 => value.as_i64().map(Number::from_i64),
            NumberKind::Uint64 => value.as_u64().map(Number::from_u64),
            NumberKind::Float64 => value.as_f64().map(Number::from_f64),
        };

        number.map(Some).ok_or_else(|| {
            ExporterError::invalid_record(format!(
                "{}: {} is not a valid {:?} value",
                self.name, value, self.number_kind
            ))
        })
    }
}
