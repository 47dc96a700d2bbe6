//! Appliance REST payload types
//!
//! The appliance wraps query results as `{"entries": [{"content": ...}]}`
//! and instance creations as `{"content": ...}`. Only the fields the
//! collector consumes are modeled; serde skips the rest.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value as JsonValue;

/// A query response: zero or more wrapped entries.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Collection<T> {
    #[serde(default)]
    pub entries: Vec<Entry<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Entry<T> {
    pub content: T,
}

/// An instance creation response: a single wrapped object.
#[derive(Debug, Deserialize)]
pub struct Instance<T> {
    pub content: T,
}

/// Appliance identity; `name` becomes the `instance` tag on every record.
#[derive(Debug, Deserialize)]
pub struct BasicSystemInfo {
    pub name: String,
}

/// Capacity counters for one pool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: String,
    pub name: String,
    pub size_free: u64,
    pub size_total: u64,
    pub size_used: u64,
    pub size_subscribed: u64,
}

/// Capacity counters for one storage resource.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageResource {
    pub id: String,
    pub name: String,
    pub size_allocated: u64,
    pub size_total: u64,
    pub size_used: u64,
}

/// One historical KPI series: scalar samples keyed by ISO timestamp.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiValue {
    pub id: String,
    pub name: String,
    pub path: String,
    pub end_time: String,
    #[serde(default)]
    pub values: BTreeMap<String, f64>,
}

impl KpiValue {
    /// The sample at the series end time, if the appliance reported one.
    pub fn latest(&self) -> Option<f64> {
        self.values.get(&self.end_time).copied()
    }
}

/// One historical metric query result: a nested value tree for one path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricValue {
    pub path: String,
    pub timestamp: String,
    pub values: JsonValue,
}

/// A created real-time metric query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRealTimeQuery {
    pub id: i64,
    pub interval: u64,
}

/// One real-time query result: same shape as a historical result.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricQueryResult {
    pub path: String,
    pub timestamp: String,
    pub values: JsonValue,
}
