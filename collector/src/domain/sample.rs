//! Sampled value trees
//!
//! The appliance reports sampled values for one path as an arbitrarily
//! nested JSON object whose branching mirrors the wildcard dimensions of
//! the path template. `SampleNode` is the typed form the flattener walks.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

/// One node of a sampled value tree.
///
/// Scalars the appliance never legitimately produces (null, boolean,
/// array) are preserved as `Unsupported` so the flattener can report them
/// per leaf instead of rejecting the whole tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleNode {
    Nested(BTreeMap<String, SampleNode>),
    Number(f64),
    Text(String),
    Unsupported(&'static str),
}

impl SampleNode {
    /// Short shape name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            SampleNode::Nested(_) => "object",
            SampleNode::Number(_) => "number",
            SampleNode::Text(_) => "string",
            SampleNode::Unsupported(kind) => kind,
        }
    }
}

impl From<&JsonValue> for SampleNode {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Object(map) => SampleNode::Nested(
                map.iter()
                    .map(|(key, child)| (key.clone(), SampleNode::from(child)))
                    .collect(),
            ),
            JsonValue::Number(n) => match n.as_f64() {
                Some(v) => SampleNode::Number(v),
                None => SampleNode::Unsupported("number"),
            },
            JsonValue::String(s) => SampleNode::Text(s.clone()),
            JsonValue::Null => SampleNode::Unsupported("null"),
            JsonValue::Bool(_) => SampleNode::Unsupported("boolean"),
            JsonValue::Array(_) => SampleNode::Unsupported("array"),
        }
    }
}
