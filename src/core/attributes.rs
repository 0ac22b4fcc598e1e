//! Attribute values, key/value pairs and the immutable attribute map.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Attribute key carrying the reporting service name.
pub const SERVICE_NAME_KEY: &str = opentelemetry_semantic_conventions::resource::SERVICE_NAME;

/// Attribute key identifying the instrumentation that produced the data.
pub const INSTRUMENTATION_PROVIDER_KEY: &str = "instrumentation.provider";

/// Fixed value of [`INSTRUMENTATION_PROVIDER_KEY`].
pub const INSTRUMENTATION_PROVIDER_VALUE: &str = "opentelemetry";

/// Attribute key identifying the exporter that shipped the data.
pub const COLLECTOR_NAME_KEY: &str = "collector.name";

/// Fixed value of [`COLLECTOR_NAME_KEY`].
pub const COLLECTOR_NAME_VALUE: &str = "newrelic-opentelemetry-exporter";

/// Scalar attribute value, carried exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Boolean value
    Bool(bool),
    /// Signed integer value
    I64(i64),
    /// Floating point value
    F64(f64),
    /// String value
    String(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(v) => write!(f, "{v}"),
            AttributeValue::I64(v) => write!(f, "{v}"),
            AttributeValue::F64(v) => write!(f, "{v}"),
            AttributeValue::String(v) => f.write_str(v),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::I64(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::F64(value)
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_owned())
    }
}

impl From<opentelemetry::Value> for AttributeValue {
    fn from(value: opentelemetry::Value) -> Self {
        match value {
            opentelemetry::Value::Bool(v) => AttributeValue::Bool(v),
            opentelemetry::Value::I64(v) => AttributeValue::I64(v),
            opentelemetry::Value::F64(v) => AttributeValue::F64(v),
            opentelemetry::Value::String(v) => AttributeValue::String(v.as_str().to_owned()),
            // Arrays have no scalar form on the wire.
            other => AttributeValue::String(other.to_string()),
        }
    }
}

/// A single key/value pair from a label set or resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    /// Attribute key
    pub key: String,
    /// Attribute value
    pub value: AttributeValue,
}

impl KeyValue {
    /// Create a new key/value pair
    pub fn new<K: Into<String>, V: Into<AttributeValue>>(key: K, value: V) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<opentelemetry::KeyValue> for KeyValue {
    fn from(kv: opentelemetry::KeyValue) -> Self {
        Self {
            key: kv.key.as_str().to_owned(),
            value: kv.value.into(),
        }
    }
}

impl From<&opentelemetry::KeyValue> for KeyValue {
    fn from(kv: &opentelemetry::KeyValue) -> Self {
        KeyValue::from(kv.clone())
    }
}

impl<K: Into<String>, V: Into<AttributeValue>> From<(K, V)> for KeyValue {
    fn from((key, value): (K, V)) -> Self {
        KeyValue::new(key, value)
    }
}

/// Immutable mapping from attribute key to scalar value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AttributeMap(HashMap<String, AttributeValue>);

impl AttributeMap {
    /// Start building a map with room for `capacity` entries
    pub fn builder(capacity: usize) -> AttributeMapBuilder {
        AttributeMapBuilder {
            inner: HashMap::with_capacity(capacity),
        }
    }

    /// Gets a value by key
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    /// Gets a string value by key
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(AttributeValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns true if the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no attributes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the attributes in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Capacity of the underlying map
    pub fn capacity(&self) -> usize {
        self.0.capacity()
    }
}

/// Local, single-owner builder for an [`AttributeMap`].
///
/// Later inserts overwrite earlier ones with the same key.
#[derive(Debug)]
pub struct AttributeMapBuilder {
    inner: HashMap<String, AttributeValue>,
}

impl AttributeMapBuilder {
    /// Insert or overwrite an attribute
    pub fn insert<K: Into<String>, V: Into<AttributeValue>>(&mut self, key: K, value: V) -> &mut Self {
        self.inner.insert(key.into(), value.into());
        self
    }

    /// Insert every pair in iteration order
    pub fn extend<'a, I>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a KeyValue>,
    {
        for kv in pairs {
            self.inner.insert(kv.key.clone(), kv.value.clone());
        }
        self
    }

    /// Finish building
    pub fn build(self) -> AttributeMap {
        AttributeMap(self.inner)
    }
}
