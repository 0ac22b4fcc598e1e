//! nrexport - OpenTelemetry transform layer for New Relic style ingest.
//!
//! nrexport turns in-process telemetry (metric aggregations and finished
//! spans) into the shapes a New Relic style ingest backend understands and
//! hands the resulting batches to a pluggable sender.
//!
//! # Architecture
//!
//! - `metrics`: aggregation records and the aggregation transformer
//! - `trace`: span records and the span transformer
//! - `export`: batching glue and the `Sender` boundary
//! - `core`: attribute types, configuration, errors
//! - `input`: JSON record files for offline runs
//! - `cli`: command-line interface
//!
//! # Example
//!
//! ```
//! use nrexport_lib::core::ServiceName;
//! use nrexport_lib::metrics::{
//!     transform, AggregationRecord, Aggregator, Descriptor, Labels, Number, NumberKind,
//!     OutputMetric,
//! };
//!
//! let service = ServiceName::new("svc1").unwrap();
//! let record = AggregationRecord::new(
//!     Descriptor::new("requests.count", NumberKind::Int64).with_unit("1"),
//!     Labels::from_iter([("A", "1")]),
//!     Aggregator::sum(Number::from_i64(42)),
//! );
//!
//! match transform(&service, &record).unwrap() {
//!     OutputMetric::Count(count) => assert_eq!(count.value, 42.0),
//!     OutputMetric::Summary(_) => unreachable!(),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod application;
pub mod cli;
pub mod core;
pub mod export;
pub mod input;
pub mod metrics;
pub mod trace;

pub use crate::application::Application;
pub use crate::core::{Config, Result};
