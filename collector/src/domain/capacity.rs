//! Capacity snapshot formatters
//!
//! Pools and storage resources report fixed-shape size counters rather
//! than a nested sample tree. Tag names are well known instead of being
//! discovered from a template; each size counter becomes its own record so
//! capacity lines look exactly like flattened metric lines downstream.

use crate::appliance::types::{Pool, StorageResource};

use super::record::{FieldValue, RecordBuilder, TagSet, TimeSeriesRecord};

/// Records for one pool's size counters.
pub fn pool_records(pool: &Pool, instance: &str, timestamp_ns: i64) -> Vec<TimeSeriesRecord> {
    let builder = RecordBuilder::new("pool", instance, timestamp_ns);

    let mut tags = TagSet::new();
    tags.insert("pool".into(), pool.id.clone());
    tags.insert("poolname".into(), pool.name.clone());

    [
        ("sizefree", pool.size_free),
        ("sizesubscribed", pool.size_subscribed),
        ("sizetotal", pool.size_total),
        ("sizeused", pool.size_used),
    ]
    .into_iter()
    .map(|(field, value)| builder.leaf(tags.clone(), field, FieldValue::Unsigned(value)))
    .collect()
}

/// Records for one storage resource's size counters.
pub fn storage_resource_records(
    resource: &StorageResource,
    instance: &str,
    timestamp_ns: i64,
) -> Vec<TimeSeriesRecord> {
    let builder = RecordBuilder::new("storageresource", instance, timestamp_ns);

    let mut tags = TagSet::new();
    tags.insert("storageresource".into(), resource.id.clone());
    tags.insert("storageresourcename".into(), resource.name.clone());

    [
        ("sizeallocated", resource.size_allocated),
        ("sizetotal", resource.size_total),
        ("sizeused", resource.size_used),
    ]
    .into_iter()
    .map(|(field, value)| builder.leaf(tags.clone(), field, FieldValue::Unsigned(value)))
    .collect()
}
