//! Metric aggregations and their transformation into ingest metrics.
//!
//! An upstream pipeline hands over one [`AggregationRecord`] per series and
//! collection cycle; [`transform`] turns each into a [`OutputMetric`].

pub mod attributes;
pub mod output;
pub mod transform;
pub mod types;

pub use attributes::build_attributes;
pub use output::{Count, OutputMetric, Summary};
pub use transform::{transform, Statistic, TransformError};
pub use types::{
    AggregationRecord, Aggregator, AggregatorError, Descriptor, Labels, MinMaxSumCountAggregation,
    MinMaxSumCountSnapshot, Number, NumberKind, Resource, SumAggregation, SumSnapshot,
};
