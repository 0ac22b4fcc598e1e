//! Aggregation transformer.
//!
//! Maps one [`AggregationRecord`] to exactly one [`OutputMetric`] or a typed
//! failure. Nothing here logs, retries or keeps state.

use crate::core::ServiceName;
use crate::metrics::attributes::build_attributes;
use crate::metrics::output::{Count, OutputMetric, Summary};
use crate::metrics::types::{
    AggregationRecord, Aggregator, AggregatorError, MinMaxSumCountAggregation, Number,
    SumAggregation,
};
use std::fmt;
use thiserror::Error;

/// Statistic being read when an aggregator failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    /// Smallest value
    Min,
    /// Largest value
    Max,
    /// Sum of values
    Sum,
    /// Number of values
    Count,
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Statistic::Min => "min",
            Statistic::Max => "max",
            Statistic::Sum => "sum",
            Statistic::Count => "count",
        })
    }
}

/// Failure transforming one aggregation record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// The aggregation kind has no output shape
    #[error("unimplemented aggregator: {kind}")]
    UnimplementedAggregator {
        /// Aggregation kind name
        kind: String,
    },

    /// Reading a statistic out of the aggregator failed
    #[error("failed to read {statistic}: {source}")]
    AggregatorRead {
        /// Statistic being read
        statistic: Statistic,
        /// Error reported by the aggregator
        #[source]
        source: AggregatorError,
    },
}

impl TransformError {
    fn read(statistic: Statistic) -> impl FnOnce(AggregatorError) -> Self {
        move |source| TransformError::AggregatorRead { statistic, source }
    }
}

/// Transform one aggregation record into a metric.
///
/// A sum aggregation becomes a [`Count`], a min/max/sum/count aggregation a
/// [`Summary`]. Any other kind fails with
/// [`TransformError::UnimplementedAggregator`].
pub fn transform(service: &ServiceName, record: &AggregationRecord) -> Result<OutputMetric, TransformError> {
    match record.aggregator() {
        Aggregator::Sum(agg) => sum(service, record, agg.as_ref()),
        Aggregator::MinMaxSumCount(agg) => min_max_sum_count(service, record, agg.as_ref()),
        Aggregator::Unsupported(kind) => Err(TransformError::UnimplementedAggregator { kind: kind.clone() }),
    }
}

fn sum(
    service: &ServiceName,
    record: &AggregationRecord,
    agg: &dyn SumAggregation,
) -> Result<OutputMetric, TransformError> {
    let desc = record.descriptor();
    let value = agg.sum().map_err(TransformError::read(Statistic::Sum))?;

    Ok(OutputMetric::Count(Count {
        name: desc.name().to_owned(),
        value: value.coerce_to_f64(desc.number_kind()),
        attributes: build_attributes(service, desc, record.labels()),
    }))
}

struct MinMaxSumCountValues {
    min: Number,
    max: Number,
    sum: Number,
    count: u64,
}

// Reads stop at the first failing statistic.
fn min_max_sum_count_values(
    agg: &dyn MinMaxSumCountAggregation,
) -> Result<MinMaxSumCountValues, TransformError> {
    let min = agg.min().map_err(TransformError::read(Statistic::Min))?;
    let max = agg.max().map_err(TransformError::read(Statistic::Max))?;
    let sum = agg.sum().map_err(TransformError::read(Statistic::Sum))?;
    let count = agg.count().map_err(TransformError::read(Statistic::Count))?;
    Ok(MinMaxSumCountValues { min, max, sum, count })
}

fn min_max_sum_count(
    service: &ServiceName,
    record: &AggregationRecord,
    agg: &dyn MinMaxSumCountAggregation,
) -> Result<OutputMetric, TransformError> {
    let desc = record.descriptor();
    let kind = desc.number_kind();
    let values = min_max_sum_count_values(agg)?;

    Ok(OutputMetric::Summary(Summary {
        name: desc.name().to_owned(),
        count: values.count as f64,
        sum: values.sum.coerce_to_f64(kind),
        min: values.min.coerce_to_f64(kind),
        max: values.max.coerce_to_f64(kind),
        attributes: build_attributes(service, desc, record.labels()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::types::{Descriptor, Labels, MinMaxSumCountSnapshot, NumberKind, SumSnapshot};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn service() -> ServiceName {
        ServiceName::new("svc1").unwrap()
    }

    fn record(kind: NumberKind, aggregator: Aggregator) -> AggregationRecord {
        AggregationRecord::new(Descriptor::new("test.metric", kind), Labels::empty(), aggregator)
    }

    /// Aggregator that fails on one statistic and counts every read.
    #[derive(Debug)]
    struct FailingAggregator {
        fail_on: Statistic,
        reads: Arc<AtomicUsize>,
    }

    impl FailingAggregator {
        fn read(&self, statistic: Statistic) -> Result<Number, AggregatorError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if statistic == self.fail_on {
                Err(AggregatorError::EmptyDataSet)
            } else {
                Ok(Number::from_f64(1.0))
            }
        }
    }

    impl MinMaxSumCountAggregation for FailingAggregator {
        fn min(&self) -> Result<Number, AggregatorError> {
            self.read(Statistic::Min)
        }

        fn max(&self) -> Result<Number, AggregatorError> {
            self.read(Statistic::Max)
        }

        fn sum(&self) -> Result<Number, AggregatorError> {
            self.read(Statistic::Sum)
        }

        fn count(&self) -> Result<u64, AggregatorError> {
            self.read(Statistic::Count).map(|_| 1)
        }
    }

    fn failing_record(fail_on: Statistic) -> (AggregationRecord, Arc<AtomicUsize>) {
        let reads = Arc::new(AtomicUsize::new(0));
        let agg = FailingAggregator {
            fail_on,
            reads: Arc::clone(&reads),
        };
        (
            record(NumberKind::Float64, Aggregator::MinMaxSumCount(Box::new(agg))),
            reads,
        )
    }

    #[test]
    fn test_sum_becomes_count() {
        let rec = record(NumberKind::Int64, Aggregator::sum(Number::from_i64(42)));

        match transform(&service(), &rec).unwrap() {
            OutputMetric::Count(count) => {
                assert_eq!(count.name, "test.metric");
                assert_eq!(count.value, 42.0);
            },
            other => panic!("Expected count, got {:?}", other),
        }
    }

    #[test]
    fn test_sum_coerces_by_kind() {
        let float = record(NumberKind::Float64, Aggregator::sum(Number::from_f64(0.25)));
        let unsigned = record(NumberKind::Uint64, Aggregator::sum(Number::from_u64(7)));

        assert!(matches!(
            transform(&service(), &float).unwrap(),
            OutputMetric::Count(Count { value, .. }) if value == 0.25
        ));
        assert!(matches!(
            transform(&service(), &unsigned).unwrap(),
            OutputMetric::Count(Count { value, .. }) if value == 7.0
        ));
    }

    #[test]
    fn test_sum_read_failure_propagates() {
        let rec = record(NumberKind::Int64, Aggregator::Sum(Box::new(SumSnapshot::default())));

        assert_eq!(
            transform(&service(), &rec),
            Err(TransformError::AggregatorRead {
                statistic: Statistic::Sum,
                source: AggregatorError::NoData,
            })
        );
    }

    #[test]
    fn test_min_max_sum_count_becomes_summary() {
        let rec = record(
            NumberKind::Float64,
            Aggregator::min_max_sum_count(
                Number::from_f64(1.0),
                Number::from_f64(9.0),
                Number::from_f64(20.0),
                5,
            ),
        );

        match transform(&service(), &rec).unwrap() {
            OutputMetric::Summary(summary) => {
                assert_eq!(summary.name, "test.metric");
                assert_eq!(summary.count, 5.0);
                assert_eq!(summary.sum, 20.0);
                assert_eq!(summary.min, 1.0);
                assert_eq!(summary.max, 9.0);
            },
            other => panic!("Expected summary, got {:?}", other),
        }
    }

    #[test]
    fn test_summary_int_kind() {
        let rec = record(
            NumberKind::Int64,
            Aggregator::min_max_sum_count(
                Number::from_i64(-3),
                Number::from_i64(4),
                Number::from_i64(2),
                3,
            ),
        );

        let OutputMetric::Summary(summary) = transform(&service(), &rec).unwrap() else {
            panic!("Expected summary");
        };
        assert_eq!(summary.min, -3.0);
        assert_eq!(summary.max, 4.0);
        assert_eq!(summary.sum, 2.0);
    }

    #[test]
    fn test_min_failure_stops_reads() {
        let (rec, reads) = failing_record(Statistic::Min);

        let err = transform(&service(), &rec).unwrap_err();
        assert_eq!(
            err,
            TransformError::AggregatorRead {
                statistic: Statistic::Min,
                source: AggregatorError::EmptyDataSet,
            }
        );
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_reads_in_fixed_order() {
        for (fail_on, expected_reads) in [
            (Statistic::Max, 2),
            (Statistic::Sum, 3),
            (Statistic::Count, 4),
        ] {
            let (rec, reads) = failing_record(fail_on);

            match transform(&service(), &rec) {
                Err(TransformError::AggregatorRead { statistic, .. }) => assert_eq!(statistic, fail_on),
                other => panic!("Expected read failure, got {:?}", other),
            }
            assert_eq!(reads.load(Ordering::SeqCst), expected_reads);
        }
    }

    #[test]
    fn test_partial_snapshot_reports_first_missing() {
        let snapshot = MinMaxSumCountSnapshot {
            min: Some(Number::from_f64(1.0)),
            max: Some(Number::from_f64(2.0)),
            sum: None,
            count: None,
        };
        let rec = record(NumberKind::Float64, Aggregator::MinMaxSumCount(Box::new(snapshot)));

        match transform(&service(), &rec) {
            Err(TransformError::AggregatorRead { statistic, source }) => {
                assert_eq!(statistic, Statistic::Sum);
                assert_eq!(source, AggregatorError::NoData);
            },
            other => panic!("Expected read failure, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_aggregator() {
        let rec = record(NumberKind::Float64, Aggregator::unsupported("histogram"));

        let err = transform(&service(), &rec).unwrap_err();
        assert_eq!(
            err,
            TransformError::UnimplementedAggregator {
                kind: "histogram".to_string()
            }
        );
        assert_eq!(err.to_string(), "unimplemented aggregator: histogram");
    }

    #[test]
    fn test_error_messages() {
        let err = TransformError::AggregatorRead {
            statistic: Statistic::Count,
            source: AggregatorError::NoData,
        };
        assert_eq!(err.to_string(), "failed to read count: no data available");
    }
}
