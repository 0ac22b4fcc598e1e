//! Common test utilities and fixtures.

#![allow(dead_code)]

use nrexport_lib::core::{AttributeValue, KeyValue, ServiceName};
use nrexport_lib::metrics::{
    AggregationRecord, Aggregator, Descriptor, Labels, Number, NumberKind, Resource,
};

/// Test fixture builder for aggregation records with sensible defaults.
pub struct TestRecordBuilder {
    name: String,
    unit: String,
    description: String,
    kind: NumberKind,
    resource: Vec<KeyValue>,
    labels: Vec<KeyValue>,
}

impl TestRecordBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            unit: String::new(),
            description: String::new(),
            kind: NumberKind::Int64,
            resource: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn kind(mut self, kind: NumberKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn resource<V: Into<AttributeValue>>(mut self, key: &str, value: V) -> Self {
        self.resource.push(KeyValue::new(key, value));
        self
    }

    pub fn label<V: Into<AttributeValue>>(mut self, key: &str, value: V) -> Self {
        self.labels.push(KeyValue::new(key, value));
        self
    }

    pub fn build(self, aggregator: Aggregator) -> AggregationRecord {
        let descriptor = Descriptor::new(self.name, self.kind)
            .with_unit(self.unit)
            .with_description(self.description)
            .with_resource(Resource::new(self.resource));
        AggregationRecord::new(descriptor, self.labels.into_iter().collect::<Labels>(), aggregator)
    }

    pub fn sum_i64(self, value: i64) -> AggregationRecord {
        self.build(Aggregator::sum(Number::from_i64(value)))
    }
}

pub fn service(name: &str) -> ServiceName {
    ServiceName::new(name).unwrap()
}

pub fn summary_f64(min: f64, max: f64, sum: f64, count: u64) -> Aggregator {
    Aggregator::min_max_sum_count(
        Number::from_f64(min),
        Number::from_f64(max),
        Number::from_f64(sum),
        count,
    )
}
