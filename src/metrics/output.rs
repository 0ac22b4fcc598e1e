//! Metric shapes accepted by the ingest backend.

use crate::core::AttributeMap;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Cumulative value of one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Count {
    /// Metric name
    pub name: String,
    /// Summed value
    pub value: f64,
    /// Metric attributes
    pub attributes: AttributeMap,
}

/// Distribution summary of one series.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Metric name
    pub name: String,
    /// Number of recorded values
    pub count: f64,
    /// Sum of recorded values
    pub sum: f64,
    /// Smallest recorded value
    pub min: f64,
    /// Largest recorded value
    pub max: f64,
    /// Metric attributes
    pub attributes: AttributeMap,
}

// The wire format nests the four statistics under `value`.
impl Serialize for Summary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct SummaryValue {
            count: f64,
            sum: f64,
            min: f64,
            max: f64,
        }

        let mut state = serializer.serialize_struct("Summary", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field(
            "value",
            &SummaryValue {
                count: self.count,
                sum: self.sum,
                min: self.min,
                max: self.max,
            },
        )?;
        state.serialize_field("attributes", &self.attributes)?;
        state.end()
    }
}

/// One transformed metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputMetric {
    /// A `count` metric
    Count(Count),
    /// A `summary` metric
    Summary(Summary),
}

impl OutputMetric {
    /// Metric name
    pub fn name(&self) -> &str {
        match self {
            OutputMetric::Count(c) => &c.name,
            OutputMetric::Summary(s) => &s.name,
        }
    }

    /// Metric attributes
    pub fn attributes(&self) -> &AttributeMap {
        match self {
            OutputMetric::Count(c) => &c.attributes,
            OutputMetric::Summary(s) => &s.attributes,
        }
    }
}
