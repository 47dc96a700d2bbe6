//! Metric flattening and line-protocol encoding
//!
//! The pipeline is: parse a path template, flatten the sampled value tree
//! against it, then encode each record as one line-protocol line. Capacity
//! and KPI formatters are fixed-shape side entrances into the same record
//! and encoder types.

pub mod capacity;
pub mod flatten;
pub mod kpi;
pub mod lineproto;
pub mod path;
pub mod record;
pub mod sample;

pub use flatten::{FlattenIssue, FlattenOutcome, flatten};
pub use path::{MetricPath, PathError};
pub use record::{FieldValue, TagSet, TimeSeriesRecord};
pub use sample::SampleNode;
