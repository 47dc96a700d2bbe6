//! InfluxDB line-protocol encoding
//!
//! One record per line: `measurement,tag=value field=value timestamp\n`
//! with the timestamp in nanoseconds since epoch. Commas, spaces, and `=`
//! inside names and values are backslash-escaped so a standard
//! line-protocol tokenizer recovers the original strings.

use std::borrow::Cow;

use super::record::{FieldValue, TimeSeriesRecord};

/// Escape a tag key, tag value, field key, or textual field value.
fn escape_component(raw: &str) -> Cow<'_, str> {
    if !raw.contains([',', ' ', '=']) {
        return Cow::Borrowed(raw);
    }
    let mut escaped = String::with_capacity(raw.len() + 4);
    for c in raw.chars() {
        if matches!(c, ',' | ' ' | '=') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// Escape a measurement name. `=` is legal in measurements, so only commas
/// and spaces are escaped.
fn escape_measurement(raw: &str) -> Cow<'_, str> {
    if !raw.contains([',', ' ']) {
        return Cow::Borrowed(raw);
    }
    let mut escaped = String::with_capacity(raw.len() + 4);
    for c in raw.chars() {
        if matches!(c, ',' | ' ') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

fn format_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Float(v) => format!("{v:.6}"),
        FieldValue::Unsigned(v) => v.to_string(),
        FieldValue::Text(s) => escape_component(s).into_owned(),
    }
}

/// Serialize one record as a line-protocol line, trailing newline included.
pub fn encode(record: &TimeSeriesRecord) -> String {
    let mut line = String::with_capacity(64);
    line.push_str(&escape_measurement(&record.measurement));
    for (key, value) in &record.tags {
        line.push(',');
        line.push_str(&escape_component(key));
        line.push('=');
        line.push_str(&escape_component(value));
    }
    line.push(' ');
    line.push_str(&escape_component(&record.field_name));
    line.push('=');
    line.push_str(&format_value(&record.field_value));
    line.push(' ');
    line.push_str(&record.timestamp_ns.to_string());
    line.push('\n');
    line
}
