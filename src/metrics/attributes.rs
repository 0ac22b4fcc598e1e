//! Attribute construction for transformed metrics.

use crate::core::attributes::{
    AttributeMap, COLLECTOR_NAME_KEY, COLLECTOR_NAME_VALUE, INSTRUMENTATION_PROVIDER_KEY,
    INSTRUMENTATION_PROVIDER_VALUE, SERVICE_NAME_KEY,
};
use crate::core::ServiceName;
use crate::metrics::types::{Descriptor, Labels};

/// Keys written for every record on top of resource and labels.
const FIXED_KEYS: usize = 5;

/// Build the attribute map of one series.
///
/// Write order is unit, description, resource attributes, labels, then the
/// provenance keys. Later writes replace earlier ones, so the provenance
/// keys always hold the exporter's values.
pub fn build_attributes(service: &ServiceName, desc: &Descriptor, labels: &Labels) -> AttributeMap {
    let resource = desc.resource();
    let mut attrs = AttributeMap::builder(FIXED_KEYS + labels.len() + resource.len());

    attrs
        .insert("unit", desc.unit())
        .insert("description", desc.description())
        .extend(resource.iter())
        .extend(labels.iter());

    attrs
        .insert(SERVICE_NAME_KEY, service.as_str())
        .insert(INSTRUMENTATION_PROVIDER_KEY, INSTRUMENTATION_PROVIDER_VALUE)
        .insert(COLLECTOR_NAME_KEY, COLLECTOR_NAME_VALUE);

    attrs.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AttributeValue;
    use crate::metrics::types::{NumberKind, Resource};

    fn service() -> ServiceName {
        ServiceName::new("svc1").unwrap()
    }

    #[test]
    fn test_fixed_keys_present() {
        let desc = Descriptor::new("m", NumberKind::Int64);
        let attrs = build_attributes(&service(), &desc, &Labels::empty());

        assert_eq!(attrs.len(), 5);
        assert_eq!(attrs.get_str("unit"), Some(""));
        assert_eq!(attrs.get_str("description"), Some(""));
        assert_eq!(attrs.get_str(SERVICE_NAME_KEY), Some("svc1"));
        assert_eq!(attrs.get_str(INSTRUMENTATION_PROVIDER_KEY), Some("opentelemetry"));
        assert_eq!(attrs.get_str(COLLECTOR_NAME_KEY), Some("newrelic-opentelemetry-exporter"));
    }

    #[test]
    fn test_labels_override_resource() {
        let desc = Descriptor::new("m", NumberKind::Int64)
            .with_resource(Resource::new([("host", "from-resource"), ("zone", "a")]));
        let labels: Labels = [("host", "from-label")].into_iter().collect();

        let attrs = build_attributes(&service(), &desc, &labels);
        assert_eq!(attrs.get_str("host"), Some("from-label"));
        assert_eq!(attrs.get_str("zone"), Some("a"));
    }

    #[test]
    fn test_labels_can_override_unit() {
        let desc = Descriptor::new("m", NumberKind::Int64).with_unit("ms");
        let labels: Labels = [("unit", "s")].into_iter().collect();

        let attrs = build_attributes(&service(), &desc, &labels);
        assert_eq!(attrs.get_str("unit"), Some("s"));
    }

    #[test]
    fn test_provenance_always_wins() {
        let desc = Descriptor::new("m", NumberKind::Int64).with_resource(Resource::new([
            (SERVICE_NAME_KEY, "resource-service"),
            (COLLECTOR_NAME_KEY, "other-collector"),
        ]));
        let labels: Labels = [
            (SERVICE_NAME_KEY, "label-service"),
            (INSTRUMENTATION_PROVIDER_KEY, "custom"),
        ]
        .into_iter()
        .collect();

        let attrs = build_attributes(&service(), &desc, &labels);
        assert_eq!(attrs.get_str(SERVICE_NAME_KEY), Some("svc1"));
        assert_eq!(attrs.get_str(INSTRUMENTATION_PROVIDER_KEY), Some(INSTRUMENTATION_PROVIDER_VALUE));
        assert_eq!(attrs.get_str(COLLECTOR_NAME_KEY), Some(COLLECTOR_NAME_VALUE));
    }

    #[test]
    fn test_values_carried_as_received() {
        let desc = Descriptor::new("m", NumberKind::Int64)
            .with_resource(Resource::new([("ratio", 0.5_f64)]));
        let labels: Labels = [("lemons", AttributeValue::I64(10)), ("ok", AttributeValue::Bool(true))]
            .into_iter()
            .collect();

        let attrs = build_attributes(&service(), &desc, &labels);
        assert_eq!(attrs.get("ratio"), Some(&AttributeValue::F64(0.5)));
        assert_eq!(attrs.get("lemons"), Some(&AttributeValue::I64(10)));
        assert_eq!(attrs.get("ok"), Some(&AttributeValue::Bool(true)));
    }

    #[test]
    fn test_deterministic() {
        let desc = Descriptor::new("m", NumberKind::Float64)
            .with_unit("1")
            .with_resource(Resource::new([("host", "h")]));
        let labels: Labels = [("A", "1"), ("B", "2")].into_iter().collect();

        let first = build_attributes(&service(), &desc, &labels);
        let second = build_attributes(&service(), &desc, &labels);
        assert_eq!(first, second);
    }

    #[test]
    fn test_capacity_hint() {
        let desc = Descriptor::new("m", NumberKind::Int64)
            .with_resource(Resource::new([("r1", "x"), ("r2", "y")]));
        let labels: Labels = [("l1", "x")].into_iter().collect();

        let attrs = build_attributes(&service(), &desc, &labels);
        assert!(attrs.capacity() >= FIXED_KEYS + 3);
    }
}
