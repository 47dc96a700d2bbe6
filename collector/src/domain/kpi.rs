//! KPI value formatter
//!
//! Historical KPI queries return one scalar per instance id instead of a
//! nested tree. The path still drives tagging: the segment equal to the
//! reported id names that instance's dimension (tagged with its id and its
//! display name), and a literal `lun` segment is followed by the LUN id.

use super::path::MetricPath;
use super::record::{FieldValue, RecordBuilder, TagSet, TimeSeriesRecord};

/// Build the record for one KPI sample.
pub fn kpi_record(
    path: &MetricPath,
    id: &str,
    name: &str,
    value: f64,
    instance: &str,
    timestamp_ns: i64,
) -> TimeSeriesRecord {
    let builder = RecordBuilder::new(path.measurement(), instance, timestamp_ns);
    let segments = path.segments();

    let mut tags = TagSet::new();
    for (i, segment) in segments.iter().enumerate() {
        let text = segment.as_str();
        if text == id && i > 0 {
            let tag_name = segments[i - 1].as_str().to_lowercase();
            tags.insert(format!("{tag_name}name"), name.replace(' ', "_"));
            tags.insert(tag_name, text.to_string());
        }
        if text == "lun" {
            if let Some(lun_id) = segments.get(i + 1) {
                tags.insert("lun".into(), lun_id.as_str().to_string());
            }
        }
    }

    builder.leaf(tags, path.field_name(), FieldValue::Float(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(template: &str, id: &str, name: &str, value: f64) -> TimeSeriesRecord {
        let path = MetricPath::parse(template).unwrap();
        kpi_record(&path, id, name, value, "U1", 7)
    }

    #[test]
    fn test_sp_utilization() {
        let r = record("kpi.sp.spa.utilization", "spa", "SP A", 42.5);

        assert_eq!(r.measurement, "kpi_sp");
        assert_eq!(r.field_name, "utilization");
        assert_eq!(r.field_value, FieldValue::Float(42.5));
        assert_eq!(r.tags.get("sp").map(String::as_str), Some("spa"));
        assert_eq!(r.tags.get("spname").map(String::as_str), Some("SP_A"));
        assert_eq!(r.tags.get("instance").map(String::as_str), Some("U1"));
    }

    #[test]
    fn test_display_name_spaces_replaced() {
        let r = record("kpi.sp.spb.utilization", "spb", "SP B primary", 1.0);
        assert_eq!(
            r.tags.get("spname").map(String::as_str),
            Some("SP_B_primary")
        );
    }

    #[test]
    fn test_lun_segment_binds_following_id() {
        let r = record("kpi.lun.lun.sv_1.throughput", "sv_1", "datastore", 9.0);

        assert_eq!(r.measurement, "kpi_lun");
        assert_eq!(r.tags.get("lun").map(String::as_str), Some("sv_1"));
        assert_eq!(r.tags.get("lunname").map(String::as_str), Some("datastore"));
        assert_eq!(r.field_name, "throughput");
    }

    #[test]
    fn test_id_missing_from_path_only_instance_tag() {
        let r = record("kpi.sp.spa.utilization", "spc", "SP C", 1.0);
        assert_eq!(r.tags.len(), 1);
        assert_eq!(r.tags.get("instance").map(String::as_str), Some("U1"));
    }
}
