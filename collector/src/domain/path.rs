//! Metric path templates
//!
//! A metric path is a dot-separated identifier such as
//! `sp.*.cpu.summary.busyTicks`. Literal segments name components of the
//! appliance's stat tree; `*` segments stand for a dimension whose values
//! are discovered at query time (storage processor, disk, network device).

use thiserror::Error;

/// Wildcard marker inside a metric path.
pub const WILDCARD: &str = "*";

/// Errors raised while parsing a metric path template.
///
/// These are configuration errors: they fail the query using the path,
/// never the whole run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("metric path '{path}' has too few segments to name a measurement")]
    TooFewSegments { path: String },

    #[error("metric path '{path}' starts with a wildcard, so its first dimension has no name")]
    LeadingWildcard { path: String },
}

/// One segment of a parsed metric path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Wildcard,
}

impl Segment {
    /// The segment as it appeared in the template.
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Literal(s) => s,
            Segment::Wildcard => WILDCARD,
        }
    }
}

/// A parsed metric path template.
///
/// Carries everything the flattener needs: the derived measurement name,
/// the ordered wildcard tag names, and the field name taken from the last
/// segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricPath {
    raw: String,
    segments: Vec<Segment>,
    measurement: String,
    wildcard_tags: Vec<String>,
}

impl MetricPath {
    /// Parse a dot-separated path template.
    ///
    /// The measurement name is `kpi_<second segment>` for paths rooted at
    /// `kpi`, and the third segment otherwise. Each wildcard contributes a
    /// tag named after the literal segment immediately preceding it, in
    /// order of appearance.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let parts: Vec<&str> = raw.split('.').collect();

        let measurement = if parts.first() == Some(&"kpi") {
            let kind = parts.get(1).ok_or_else(|| PathError::TooFewSegments {
                path: raw.to_string(),
            })?;
            format!("kpi_{kind}")
        } else {
            parts
                .get(2)
                .ok_or_else(|| PathError::TooFewSegments {
                    path: raw.to_string(),
                })?
                .to_string()
        };

        let mut wildcard_tags = Vec::new();
        for (i, part) in parts.iter().enumerate() {
            if *part == WILDCARD {
                if i == 0 {
                    return Err(PathError::LeadingWildcard {
                        path: raw.to_string(),
                    });
                }
                wildcard_tags.push(parts[i - 1].to_string());
            }
        }

        let segments = parts
            .iter()
            .map(|p| {
                if *p == WILDCARD {
                    Segment::Wildcard
                } else {
                    Segment::Literal(p.to_string())
                }
            })
            .collect();

        Ok(Self {
            raw: raw.to_string(),
            segments,
            measurement,
            wildcard_tags,
        })
    }

    /// The template exactly as supplied.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Output measurement name derived from the template.
    pub fn measurement(&self) -> &str {
        &self.measurement
    }

    /// Tag names for wildcard dimensions, in template order.
    pub fn wildcard_tag_names(&self) -> &[String] {
        &self.wildcard_tags
    }

    /// Field name for leaf values: the last segment of the template.
    pub fn field_name(&self) -> &str {
        self.segments
            .last()
            .map(Segment::as_str)
            .unwrap_or_default()
    }

    /// Whether `key` names a literal segment of the template.
    ///
    /// Tree levels whose key appears literally in the template are
    /// structural: they mirror a fixed component of the path rather than a
    /// discovered dimension value.
    pub fn matches_literal(&self, key: &str) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Literal(l) if l == key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_from_third_segment() {
        let path = MetricPath::parse("sp.*.cpu.summary.busyTicks").unwrap();
        assert_eq!(path.measurement(), "cpu");
    }

    #[test]
    fn test_measurement_from_kpi_prefix() {
        let path = MetricPath::parse("kpi.sp.spa.utilization").unwrap();
        assert_eq!(path.measurement(), "kpi_sp");
    }

    #[test]
    fn test_wildcard_tag_names_single() {
        let path = MetricPath::parse("sp.*.cpu.summary.busyTicks").unwrap();
        assert_eq!(path.wildcard_tag_names(), ["sp"]);
    }

    #[test]
    fn test_wildcard_tag_names_multiple_in_order() {
        let path = MetricPath::parse("sp.*.net.device.*.bytesOut").unwrap();
        assert_eq!(path.wildcard_tag_names(), ["sp", "device"]);
    }

    #[test]
    fn test_no_wildcards() {
        let path = MetricPath::parse("sp.spa.memory.summary.totalBytes").unwrap();
        assert!(path.wildcard_tag_names().is_empty());
    }

    #[test]
    fn test_field_name_is_last_segment() {
        let path = MetricPath::parse("sp.*.cpu.summary.busyTicks").unwrap();
        assert_eq!(path.field_name(), "busyTicks");
    }

    #[test]
    fn test_too_few_segments_plain_path() {
        let err = MetricPath::parse("sp.spa").unwrap_err();
        assert!(matches!(err, PathError::TooFewSegments { .. }));
    }

    #[test]
    fn test_too_few_segments_kpi_path() {
        let err = MetricPath::parse("kpi").unwrap_err();
        assert!(matches!(err, PathError::TooFewSegments { .. }));
    }

    #[test]
    fn test_kpi_path_needs_only_two_segments() {
        let path = MetricPath::parse("kpi.sp.spa.utilization").unwrap();
        assert_eq!(path.field_name(), "utilization");
    }

    #[test]
    fn test_leading_wildcard_rejected() {
        let err = MetricPath::parse("*.sp.cpu").unwrap_err();
        assert!(matches!(err, PathError::LeadingWildcard { .. }));
    }

    #[test]
    fn test_empty_path_rejected() {
        let err = MetricPath::parse("").unwrap_err();
        assert!(matches!(err, PathError::TooFewSegments { .. }));
    }

    #[test]
    fn test_matches_literal() {
        let path = MetricPath::parse("sp.*.cpu.summary.busyTicks").unwrap();
        assert!(path.matches_literal("cpu"));
        assert!(path.matches_literal("summary"));
        assert!(!path.matches_literal("spa"));
        assert!(!path.matches_literal("*"));
    }

    #[test]
    fn test_raw_round_trip() {
        let raw = "sp.*.cpu.summary.busyTicks";
        let path = MetricPath::parse(raw).unwrap();
        assert_eq!(path.raw(), raw);
        assert_eq!(path.segments().len(), 5);
    }
}
