//! Aggregation records as handed over by the instrumentation pipeline.

use crate::core::attributes::{AttributeValue, KeyValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Declared numeric kind of an instrument.
///
/// Decides how the raw bits of a [`Number`] are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberKind {
    /// Signed 64-bit integer
    Int64,
    /// 64-bit float
    Float64,
    /// Unsigned 64-bit integer
    Uint64,
}

/// Raw 64-bit numeric storage, interpreted through a [`NumberKind`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Number(u64);

impl Number {
    /// Wrap a signed integer
    pub const fn from_i64(value: i64) -> Self {
        Number(value as u64)
    }

    /// Wrap a float
    pub fn from_f64(value: f64) -> Self {
        Number(value.to_bits())
    }

    /// Wrap an unsigned integer
    pub const fn from_u64(value: u64) -> Self {
        Number(value)
    }

    /// Read the bits as a signed integer
    pub const fn as_i64(self) -> i64 {
        self.0 as i64
    }

    /// Read the bits as a float
    pub fn as_f64(self) -> f64 {
        f64::from_bits(self.0)
    }

    /// Read the bits as an unsigned integer
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Convert to `f64` according to the declared kind
    pub fn coerce_to_f64(self, kind: NumberKind) -> f64 {
        match kind {
            NumberKind::Int64 => self.as_i64() as f64,
            NumberKind::Float64 => self.as_f64(),
            NumberKind::Uint64 => self.as_u64() as f64,
        }
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number({:#018x})", self.0)
    }
}

/// Attributes identifying the entity that reports telemetry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource(Vec<KeyValue>);

impl Resource {
    /// Create a resource from key/value pairs
    pub fn new<I, T>(attributes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<KeyValue>,
    {
        Resource(attributes.into_iter().map(Into::into).collect())
    }

    /// An empty resource
    pub fn empty() -> Self {
        Resource(Vec::new())
    }

    /// Attributes in their declared order
    pub fn iter(&self) -> std::slice::Iter<'_, KeyValue> {
        self.0.iter()
    }

    /// Look up an attribute value by key (last match wins)
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.iter().rev().find(|kv| kv.key == key).map(|kv| &kv.value)
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the resource has no attributes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Ordered label set identifying one metric series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(Vec<KeyValue>);

impl Labels {
    /// An empty label set
    pub fn empty() -> Self {
        Labels(Vec::new())
    }

    /// Labels in iteration order
    pub fn iter(&self) -> std::slice::Iter<'_, KeyValue> {
        self.0.iter()
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no labels
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Into<KeyValue>> FromIterator<T> for Labels {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Labels(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Labels {
    type Item = &'a KeyValue;
    type IntoIter = std::slice::Iter<'a, KeyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Static metadata about an instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    name: String,
    unit: String,
    description: String,
    number_kind: NumberKind,
    resource: Resource,
}

impl Descriptor {
    /// Create a descriptor with an empty unit, description and resource
    pub fn new<S: Into<String>>(name: S, number_kind: NumberKind) -> Self {
        Self {
            name: name.into(),
            unit: String::new(),
            description: String::new(),
            number_kind,
            resource: Resource::empty(),
        }
    }

    /// Set the unit
    pub fn with_unit<S: Into<String>>(mut self, unit: S) -> Self {
        self.unit = unit.into();
        self
    }

    /// Set the description
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    /// Set the owning resource
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resource = resource;
        self
    }

    /// Instrument name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit, possibly empty
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Description, possibly empty
    pub fn description(&self) -> &str {
        &self.description
    }

    /// How stored numbers are interpreted
    pub fn number_kind(&self) -> NumberKind {
        self.number_kind
    }

    /// Resource the instrument belongs to
    pub fn resource(&self) -> &Resource {
        &self.resource
    }
}

/// Failure reading a statistic out of an aggregator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregatorError {
    /// Nothing was recorded in the collection interval
    #[error("no data collected by this aggregator")]
    EmptyDataSet,

    /// The statistic is not available
    #[error("no data available")]
    NoData,

    /// The aggregator state cannot be read
    #[error("inconsistent aggregator state: {0}")]
    Inconsistent(String),
}

/// Aggregation exposing a single cumulative value.
pub trait SumAggregation: Send + Sync + fmt::Debug {
    /// The accumulated sum
    fn sum(&self) -> Result<Number, AggregatorError>;
}

/// Aggregation exposing minimum, maximum, sum and count.
pub trait MinMaxSumCountAggregation: Send + Sync + fmt::Debug {
    /// The smallest recorded value
    fn min(&self) -> Result<Number, AggregatorError>;
    /// The largest recorded value
    fn max(&self) -> Result<Number, AggregatorError>;
    /// The sum of recorded values
    fn sum(&self) -> Result<Number, AggregatorError>;
    /// The number of recorded values
    fn count(&self) -> Result<u64, AggregatorError>;
}

/// Accumulated state of one series, tagged by aggregation kind.
#[derive(Debug)]
pub enum Aggregator {
    /// Cumulative sum
    Sum(Box<dyn SumAggregation>),
    /// Min, max, sum and count
    MinMaxSumCount(Box<dyn MinMaxSumCountAggregation>),
    /// Any other aggregation kind, named for error reporting
    Unsupported(String),
}

impl Aggregator {
    /// A sum aggregator holding a known value
    pub fn sum(value: Number) -> Self {
        Aggregator::Sum(Box::new(SumSnapshot::new(value)))
    }

    /// A min/max/sum/count aggregator holding known values
    pub fn min_max_sum_count(min: Number, max: Number, sum: Number, count: u64) -> Self {
        Aggregator::MinMaxSumCount(Box::new(MinMaxSumCountSnapshot {
            min: Some(min),
            max: Some(max),
            sum: Some(sum),
            count: Some(count),
        }))
    }

    /// An aggregator of a kind the transformer does not handle
    pub fn unsupported<S: Into<String>>(kind: S) -> Self {
        Aggregator::Unsupported(kind.into())
    }

    /// Name of the aggregation kind
    pub fn kind(&self) -> &str {
        match self {
            Aggregator::Sum(_) => "sum",
            Aggregator::MinMaxSumCount(_) => "min_max_sum_count",
            Aggregator::Unsupported(kind) => kind,
        }
    }
}

/// Sum aggregation resolved at collection time.
///
/// A missing value reads as [`AggregatorError::NoData`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SumSnapshot {
    /// Accumulated sum
    pub value: Option<Number>,
}

impl SumSnapshot {
    /// A snapshot holding a known sum
    pub fn new(value: Number) -> Self {
        Self { value: Some(value) }
    }
}

impl SumAggregation for SumSnapshot {
    fn sum(&self) -> Result<Number, AggregatorError> {
        self.value.ok_or(AggregatorError::NoData)
    }
}

/// Min/max/sum/count aggregation resolved at collection time.
///
/// Each missing field reads as [`AggregatorError::NoData`] on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinMaxSumCountSnapshot {
    /// Smallest recorded value
    pub min: Option<Number>,
    /// Largest recorded value
    pub max: Option<Number>,
    /// Sum of recorded values
    pub sum: Option<Number>,
    /// Number of recorded values
    pub count: Option<u64>,
}

impl MinMaxSumCountAggregation for MinMaxSumCountSnapshot {
    fn min(&self) -> Result<Number, AggregatorError> {
        self.min.ok_or(AggregatorError::NoData)
    }

    fn max(&self) -> Result<Number, AggregatorError> {
        self.max.ok_or(AggregatorError::NoData)
    }

    fn sum(&self) -> Result<Number, AggregatorError> {
        self.sum.ok_or(AggregatorError::NoData)
    }

    fn count(&self) -> Result<u64, AggregatorError> {
        self.count.ok_or(AggregatorError::NoData)
    }
}

/// Snapshot of one series handed to the transformer.
#[derive(Debug)]
pub struct AggregationRecord {
    descriptor: Descriptor,
    labels: Labels,
    aggregator: Aggregator,
}

impl AggregationRecord {
    /// Create a record from its parts
    pub fn new(descriptor: Descriptor, labels: Labels, aggregator: Aggregator) -> Self {
        Self {
            descriptor,
            labels,
            aggregator,
        }
    }

    /// Instrument metadata
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Series labels
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Collected aggregation
    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }
}
