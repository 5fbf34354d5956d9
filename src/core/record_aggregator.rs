use crate::camera_record::CameraRecord;
use crate::errors::AggregateError;
use log::debug;
use serde_json::{Deserializer, Value};
use std::collections::HashMap;

/// Turns a directory response body into an ordered list of camera records.
///
/// The directory emits its camera list with the array fencing stripped line by
/// line, leaving JSON objects glued together with no separator. Any leftover
/// `[`/`]` is removed per line, the remaining objects are read back as one
/// sequence (with or without a single comma between them) and each is
/// validated. A comma before the first or after the last object is rejected.
/// Source order is preserved. An empty body yields an empty list.
pub fn aggregate(raw_body: &str) -> Result<Vec<CameraRecord>, AggregateError> {
    let cleaned = strip_array_fencing(raw_body);
    let values = parse_value_sequence(&cleaned)?;
    debug!("Aggregating {} camera object(s) from {} byte body", values.len(), raw_body.len());

    let mut records = Vec::with_capacity(values.len());
    let mut seen_ids: HashMap<u64, usize> = HashMap::new();
    for (index, value) in values.into_iter().enumerate() {
        let record = record_from_value(index, value)?;
        if let Some(first_index) = seen_ids.insert(record.id, index) {
            return Err(AggregateError::MalformedRecord {
                index,
                reason: format!("duplicate cameraid {} (first seen at index {})", record.id, first_index),
            });
        }
        records.push(record);
    }
    Ok(records)
}

/// Removes every `[` and `]` line by line and concatenates the lines.
pub(crate) fn strip_array_fencing(raw_body: &str) -> String {
    raw_body
        .lines()
        .map(|line| line.replace(|c: char| c == '[' || c == ']', ""))
        .collect()
}

fn parse_value_sequence(cleaned: &str) -> Result<Vec<Value>, AggregateError> {
    let mut values = Vec::new();
    let mut rest = cleaned;
    loop {
        rest = rest.trim_start();
        if !values.is_empty() {
            if let Some(after_comma) = rest.strip_prefix(',') {
                rest = after_comma.trim_start();
                if rest.is_empty() {
                    return Err(AggregateError::InvalidBody("trailing comma after the last object".to_string()));
                }
            }
        }
        if rest.is_empty() {
            break;
        }

        let mut stream = Deserializer::from_str(rest).into_iter::<Value>();
        match stream.next() {
            Some(Ok(value)) => {
                values.push(value);
                rest = &rest[stream.byte_offset()..];
            }
            Some(Err(e)) => return Err(AggregateError::InvalidBody(e.to_string())),
            None => break,
        }
    }
    Ok(values)
}

fn record_from_value(index: usize, value: Value) -> Result<CameraRecord, AggregateError> {
    if !value.is_object() {
        return Err(AggregateError::MalformedRecord {
            index,
            reason: format!("expected a JSON object, found {}", value_kind(&value)),
        });
    }
    let record: CameraRecord = serde_json::from_value(value)
        .map_err(|e| AggregateError::MalformedRecord { index, reason: e.to_string() })?;

    if record.id == 0 {
        return Err(AggregateError::MalformedRecord {
            index,
            reason: "cameraid must be a positive integer".to_string(),
        });
    }
    if record.source_url.trim().is_empty() {
        return Err(AggregateError::MalformedRecord {
            index,
            reason: "rtspurl cannot be empty".to_string(),
        });
    }
    // The URL is written verbatim into a single config line.
    if record.source_url.chars().any(char::is_control) {
        return Err(AggregateError::MalformedRecord {
            index,
            reason: "rtspurl contains control characters".to_string(),
        });
    }
    if !has_uri_scheme(&record.source_url) {
        return Err(AggregateError::MalformedRecord {
            index,
            reason: format!("rtspurl '{}' is not a scheme://... URI", record.source_url),
        });
    }
    Ok(record)
}

/// `scheme://rest` with an RFC 3986 scheme and a non-empty rest.
fn has_uri_scheme(url: &str) -> bool {
    let Some((scheme, rest)) = url.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    starts_alpha
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && !rest.is_empty()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_json(id: u64, url: &str, path: &str) -> String {
        format!(r#"{{"cameraid":{},"rtspurl":"{}","streampath":"{}"}}"#, id, url, path)
    }

    #[test]
    fn empty_body_yields_no_records() {
        assert!(aggregate("").unwrap().is_empty());
        assert!(aggregate("  \n ").unwrap().is_empty());
    }

    #[test]
    fn concatenated_objects_keep_source_order() {
        let body = format!(
            "{}{}{}",
            camera_json(5, "rtsp://a", "/p5"),
            camera_json(2, "rtsp://b", "/p2"),
            camera_json(9, "rtsp://c", "/p9")
        );
        let records = aggregate(&body).unwrap();
        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 2, 9]);
        assert_eq!(records[1], CameraRecord::new(2, "rtsp://b", "/p2"));
    }

    #[test]
    fn per_line_fencing_is_stripped() {
        let body = format!(
            "[{}\n{}]\n[{}]",
            camera_json(1, "rtsp://a", "/p1"),
            camera_json(2, "rtsp://b", "/p2"),
            camera_json(3, "rtsp://c", "/p3")
        );
        let records = aggregate(&body).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].source_url, "rtsp://c");
    }

    #[test]
    fn well_formed_array_is_accepted() {
        let body = format!(
            "[{},{}]",
            camera_json(1, "rtsp://a", "/p1"),
            camera_json(2, "rtsp://b", "/p2")
        );
        let records = aggregate(&body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].stream_path, "/p1");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let body = r#"{"cameraid":4,"userid":12,"name":"porch","rtspurl":"rtsp://x","streampath":"/x"}"#;
        let records = aggregate(body).unwrap();
        assert_eq!(records, vec![CameraRecord::new(4, "rtsp://x", "/x")]);
    }

    #[test]
    fn missing_field_names_the_offending_index() {
        let body = format!(
            "{}{}{}",
            camera_json(1, "rtsp://a", "/p1"),
            r#"{"cameraid":2,"streampath":"/p2"}"#,
            camera_json(3, "rtsp://c", "/p3")
        );
        match aggregate(&body) {
            Err(AggregateError::MalformedRecord { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("rtspurl"), "reason was: {}", reason);
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn wrong_field_type_is_malformed() {
        let body = r#"{"cameraid":"7","rtspurl":"rtsp://a","streampath":"/p"}"#;
        assert!(matches!(
            aggregate(body),
            Err(AggregateError::MalformedRecord { index: 0, .. })
        ));
    }

    #[test]
    fn non_positive_or_duplicate_ids_are_rejected() {
        assert!(matches!(
            aggregate(&camera_json(0, "rtsp://a", "/p")),
            Err(AggregateError::MalformedRecord { index: 0, .. })
        ));
        assert!(matches!(
            aggregate(r#"{"cameraid":-3,"rtspurl":"rtsp://a","streampath":"/p"}"#),
            Err(AggregateError::MalformedRecord { index: 0, .. })
        ));

        let body = format!("{}{}", camera_json(8, "rtsp://a", "/a"), camera_json(8, "rtsp://b", "/b"));
        assert!(matches!(
            aggregate(&body),
            Err(AggregateError::MalformedRecord { index: 1, .. })
        ));
    }

    #[test]
    fn empty_source_url_is_rejected() {
        assert!(matches!(
            aggregate(&camera_json(1, "", "/p")),
            Err(AggregateError::MalformedRecord { index: 0, .. })
        ));
    }

    #[test]
    fn source_url_with_embedded_newline_is_rejected() {
        let body = format!(
            "{}{}",
            camera_json(1, "rtsp://a", "/p1"),
            r#"{"cameraid":2,"rtspurl":"rtsp://b\n  evil:\n    runOnReady: rm -rf /","streampath":"/p"}"#
        );
        match aggregate(&body) {
            Err(AggregateError::MalformedRecord { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("control"), "reason was: {}", reason);
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
        assert!(matches!(
            aggregate(r#"{"cameraid":3,"rtspurl":"rtsp://c\tx","streampath":"/p"}"#),
            Err(AggregateError::MalformedRecord { index: 0, .. })
        ));
    }

    #[test]
    fn source_url_needs_a_scheme() {
        for url in ["10.0.0.5/live", "://host", "1rtsp://host", "rtsp://", "rt sp://host"] {
            assert!(
                matches!(aggregate(&camera_json(1, url, "/p")), Err(AggregateError::MalformedRecord { index: 0, .. })),
                "accepted {}",
                url
            );
        }
        let records = aggregate(&camera_json(1, "rtsps://user:pw@10.0.0.5:322/live?ch=1", "/p")).unwrap();
        assert_eq!(records[0].source_url, "rtsps://user:pw@10.0.0.5:322/live?ch=1");
    }

    #[test]
    fn stray_commas_are_invalid() {
        let one = camera_json(1, "rtsp://a", "/p1");
        assert!(matches!(aggregate(&format!("{},", one)), Err(AggregateError::InvalidBody(_))));
        assert!(matches!(aggregate(&format!(",{}", one)), Err(AggregateError::InvalidBody(_))));
        assert!(matches!(aggregate(&format!("{},,{}", one, one)), Err(AggregateError::InvalidBody(_))));
    }

    #[test]
    fn non_object_element_is_malformed() {
        let body = format!("{} 42", camera_json(1, "rtsp://a", "/p"));
        match aggregate(&body) {
            Err(AggregateError::MalformedRecord { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("number"));
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn garbage_body_is_invalid() {
        assert!(matches!(aggregate("<html>502</html>"), Err(AggregateError::InvalidBody(_))));
        assert!(matches!(aggregate(r#"{"cameraid":1"#), Err(AggregateError::InvalidBody(_))));
    }
}
