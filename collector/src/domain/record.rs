//! Time-series records
//!
//! A record is one (measurement, tag set, field, timestamp) tuple. Records
//! are constructed at a leaf of the flatten walk or by a scalar formatter,
//! serialized immediately, and never mutated afterwards.

use std::collections::BTreeMap;

/// Tag identifying which polled appliance produced a record.
pub const INSTANCE_TAG: &str = "instance";

/// Tag name → value. BTreeMap keeps tag iteration order stable so encoding
/// the same record twice is byte-identical.
pub type TagSet = BTreeMap<String, String>;

/// A single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Sampled measurement value; encodes with six fractional digits.
    Float(f64),
    /// Capacity counter; encodes as a plain decimal integer.
    Unsigned(u64),
    /// Textual sample; copied verbatim after escaping.
    Text(String),
}

/// One flat time-series data point ready for line-protocol encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesRecord {
    pub measurement: String,
    pub tags: TagSet,
    pub field_name: String,
    pub field_value: FieldValue,
    pub timestamp_ns: i64,
}

/// Builds records for one flatten call.
///
/// Owns the measurement name, the appliance identity, and the sample
/// timestamp, and injects the mandatory `instance` tag. Only leaves go
/// through here; intermediate tree nodes contribute tag bindings alone.
#[derive(Debug)]
pub struct RecordBuilder<'a> {
    measurement: &'a str,
    instance: &'a str,
    timestamp_ns: i64,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(measurement: &'a str, instance: &'a str, timestamp_ns: i64) -> Self {
        Self {
            measurement,
            instance,
            timestamp_ns,
        }
    }

    /// Finish a record from the tags accumulated down one branch of the
    /// walk plus the leaf's field.
    pub fn leaf(&self, mut tags: TagSet, field_name: &str, field_value: FieldValue) -> TimeSeriesRecord {
        tags.insert(INSTANCE_TAG.to_string(), self.instance.to_string());
        TimeSeriesRecord {
            measurement: self.measurement.to_string(),
            tags,
            field_name: field_name.to_string(),
            field_value,
            timestamp_ns: self.timestamp_ns,
        }
    }
}
