//! Nested sample tree flattening
//!
//! Walks a sampled value tree in lock-step with its path template and
//! emits one record per leaf scalar. Tree levels whose key appears
//! literally in the template are structural and contribute no tag; every
//! other level is a wildcard dimension and binds the next positional tag
//! name. Literal matches win when both could apply and never consume a
//! wildcard slot.
//!
//! Each sibling branch walks an independent copy of the tag accumulator
//! and depth counter, so a tag bound deep in one subtree is never visible
//! in a sibling's records.

use thiserror::Error;

use super::path::MetricPath;
use super::record::{FieldValue, RecordBuilder, TagSet, TimeSeriesRecord};
use super::sample::SampleNode;

/// A defect found in the shape of a sampled tree.
///
/// Issues isolate failures to a single branch or leaf: the rest of the
/// tree still flattens, and the caller decides how loudly to report them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlattenIssue {
    #[error("nested key '{key}' has no wildcard dimension left at depth {depth}")]
    UnmappedBranch { key: String, depth: usize },

    #[error("unsupported {kind} value at key '{key}'")]
    UnsupportedValue { key: String, kind: &'static str },

    #[error("sample tree root is a {kind}, expected an object")]
    RootShape { kind: &'static str },
}

/// Records plus the per-leaf defects encountered while producing them.
/// Partial output is expected: a bad leaf never discards its siblings.
#[derive(Debug, Default)]
pub struct FlattenOutcome {
    pub records: Vec<TimeSeriesRecord>,
    pub issues: Vec<FlattenIssue>,
}

/// Flatten one sampled tree into time-series records.
pub fn flatten(
    path: &MetricPath,
    tree: &SampleNode,
    instance: &str,
    timestamp_ns: i64,
) -> FlattenOutcome {
    let mut outcome = FlattenOutcome::default();
    let builder = RecordBuilder::new(path.measurement(), instance, timestamp_ns);

    match tree {
        SampleNode::Nested(map) => {
            walk(path, &builder, map, &TagSet::new(), 0, &mut outcome);
        }
        other => outcome.issues.push(FlattenIssue::RootShape {
            kind: other.kind(),
        }),
    }

    outcome
}

fn walk(
    path: &MetricPath,
    builder: &RecordBuilder<'_>,
    node: &std::collections::BTreeMap<String, SampleNode>,
    tags: &TagSet,
    depth: usize,
    outcome: &mut FlattenOutcome,
) {
    for (key, value) in node {
        match value {
            SampleNode::Nested(child) => {
                if path.matches_literal(key) {
                    // Structural level: descend without binding a tag or
                    // consuming a wildcard slot.
                    walk(path, builder, child, tags, depth, outcome);
                } else if let Some(tag_name) = path.wildcard_tag_names().get(depth) {
                    let mut branch_tags = tags.clone();
                    branch_tags.insert(tag_name.clone(), key.clone());
                    walk(path, builder, child, &branch_tags, depth + 1, outcome);
                } else {
                    outcome.issues.push(FlattenIssue::UnmappedBranch {
                        key: key.clone(),
                        depth,
                    });
                }
            }
            SampleNode::Number(v) => {
                let record = leaf(path, builder, tags, depth, key, FieldValue::Float(*v));
                outcome.records.push(record);
            }
            SampleNode::Text(s) => {
                let record = leaf(path, builder, tags, depth, key, FieldValue::Text(s.clone()));
                outcome.records.push(record);
            }
            SampleNode::Unsupported(kind) => {
                outcome.issues.push(FlattenIssue::UnsupportedValue {
                    key: key.clone(),
                    kind,
                });
            }
        }
    }
}

fn leaf(
    path: &MetricPath,
    builder: &RecordBuilder<'_>,
    tags: &TagSet,
    depth: usize,
    key: &str,
    value: FieldValue,
) -> TimeSeriesRecord {
    let mut leaf_tags = tags.clone();
    // A leaf key is the value of the next wildcard dimension when one is
    // still unconsumed; otherwise it mirrors a literal segment (usually
    // the field name itself) and binds nothing.
    if let Some(tag_name) = path.wildcard_tag_names().get(depth) {
        leaf_tags.insert(tag_name.clone(), key.to_string());
    }
    builder.leaf(leaf_tags, path.field_name(), value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TS: i64 = 1_620_000_000_000_000_000;

    fn flatten_json(template: &str, tree: serde_json::Value) -> FlattenOutcome {
        let path = MetricPath::parse(template).unwrap();
        flatten(&path, &SampleNode::from(&tree), "U1", TS)
    }

    fn tag<'a>(record: &'a TimeSeriesRecord, name: &str) -> Option<&'a str> {
        record.tags.get(name).map(String::as_str)
    }

    #[test]
    fn test_single_wildcard_deep_tree() {
        let outcome = flatten_json(
            "sp.*.cpu.summary.busyTicks",
            json!({"spa": {"cpu": {"summary": {"busyTicks": 1234.0}}}}),
        );

        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.records.len(), 1);

        let record = &outcome.records[0];
        assert_eq!(record.measurement, "cpu");
        assert_eq!(record.field_name, "busyTicks");
        assert_eq!(record.field_value, FieldValue::Float(1234.0));
        assert_eq!(record.timestamp_ns, TS);
        assert_eq!(tag(record, "sp"), Some("spa"));
        assert_eq!(tag(record, "instance"), Some("U1"));
        assert_eq!(record.tags.len(), 2);
    }

    #[test]
    fn test_single_wildcard_flat_tree() {
        let outcome = flatten_json("sp.*.cpu.summary.busyTicks", json!({"spa": 1234.0}));

        assert_eq!(outcome.records.len(), 1);
        let record = &outcome.records[0];
        assert_eq!(tag(record, "sp"), Some("spa"));
        assert_eq!(record.field_value, FieldValue::Float(1234.0));
    }

    #[test]
    fn test_sibling_branches_do_not_share_tags() {
        let outcome = flatten_json(
            "sp.*.cpu.summary.busyTicks",
            json!({
                "spa": {"cpu": {"summary": {"busyTicks": 1.0}}},
                "spb": {"cpu": {"summary": {"busyTicks": 2.0}}},
            }),
        );

        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.records.len(), 2);

        let spa = &outcome.records[0];
        let spb = &outcome.records[1];
        assert_eq!(tag(spa, "sp"), Some("spa"));
        assert_eq!(tag(spb, "sp"), Some("spb"));

        // Tag sets differ only in the sp value.
        assert_eq!(spa.tags.len(), spb.tags.len());
        assert_eq!(tag(spa, "instance"), tag(spb, "instance"));
        assert_eq!(spa.field_value, FieldValue::Float(1.0));
        assert_eq!(spb.field_value, FieldValue::Float(2.0));
    }

    #[test]
    fn test_two_wildcard_dimensions() {
        let outcome = flatten_json(
            "sp.*.net.device.*.bytesOut",
            json!({
                "spa": {"eth0": 10.0, "eth1": 20.0},
                "spb": {"eth0": 30.0},
            }),
        );

        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.records.len(), 3);

        let first = &outcome.records[0];
        assert_eq!(first.measurement, "net");
        assert_eq!(tag(first, "sp"), Some("spa"));
        assert_eq!(tag(first, "device"), Some("eth0"));
        assert_eq!(first.field_name, "bytesOut");

        let last = &outcome.records[2];
        assert_eq!(tag(last, "sp"), Some("spb"));
        assert_eq!(tag(last, "device"), Some("eth0"));
    }

    #[test]
    fn test_structural_levels_interleaved_with_wildcards() {
        let outcome = flatten_json(
            "sp.*.net.device.*.bytesOut",
            json!({"spa": {"device": {"eth0": {"bytesOut": 5.0}}}}),
        );

        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.records.len(), 1);

        let record = &outcome.records[0];
        assert_eq!(tag(record, "sp"), Some("spa"));
        assert_eq!(tag(record, "device"), Some("eth0"));
        assert_eq!(record.tags.len(), 3);
    }

    #[test]
    fn test_text_leaf_kept_verbatim() {
        let outcome = flatten_json("sp.*.system.summary.state", json!({"spa": "OK"}));

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(
            outcome.records[0].field_value,
            FieldValue::Text("OK".into())
        );
    }

    #[test]
    fn test_unsupported_leaf_skipped_with_issue() {
        let outcome = flatten_json(
            "sp.*.cpu.summary.busyTicks",
            json!({"spa": 1.0, "spb": null}),
        );

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(
            outcome.issues,
            vec![FlattenIssue::UnsupportedValue {
                key: "spb".into(),
                kind: "null",
            }]
        );
    }

    #[test]
    fn test_branch_deeper_than_template_skipped_with_issue() {
        let outcome = flatten_json(
            "sp.*.cpu.summary.busyTicks",
            json!({"spa": {"unexpected": {"busyTicks": 1.0}}}),
        );

        assert!(outcome.records.is_empty());
        assert_eq!(
            outcome.issues,
            vec![FlattenIssue::UnmappedBranch {
                key: "unexpected".into(),
                depth: 1,
            }]
        );
    }

    #[test]
    fn test_scalar_root_reported() {
        let outcome = flatten_json("sp.*.cpu.summary.busyTicks", json!(1234.0));

        assert!(outcome.records.is_empty());
        assert_eq!(
            outcome.issues,
            vec![FlattenIssue::RootShape { kind: "number" }]
        );
    }

    #[test]
    fn test_bad_leaf_does_not_discard_siblings() {
        let outcome = flatten_json(
            "sp.*.cpu.summary.busyTicks",
            json!({
                "spa": {"cpu": {"summary": {"busyTicks": [1.0]}}},
                "spb": {"cpu": {"summary": {"busyTicks": 2.0}}},
            }),
        );

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(tag(&outcome.records[0], "sp"), Some("spb"));
        assert_eq!(outcome.issues.len(), 1);
    }

    #[test]
    fn test_wildcard_free_path_single_leaf() {
        let outcome = flatten_json("sp.spa.memory.summary.totalBytes", json!({"totalBytes": 7.0}));

        assert_eq!(outcome.records.len(), 1);
        let record = &outcome.records[0];
        assert_eq!(record.measurement, "memory");
        assert_eq!(record.field_name, "totalBytes");
        // No wildcard dimensions: only the instance tag is present.
        assert_eq!(record.tags.len(), 1);
        assert_eq!(tag(record, "instance"), Some("U1"));
    }
}
