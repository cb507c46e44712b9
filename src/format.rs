//! Value and timestamp formatting for register readings.
//!
//! Pure helpers shared by the monitor table and the chart tooltips.

use serde_json::Value;

/// Default decimal precision for FLOAT32 values.
pub const DEFAULT_DECIMALS: usize = 2;

/// Render a register value for display.
///
/// Sequences are formatted element-wise and joined with ", ". Numbers with
/// the logical type `FLOAT32` get fixed `decimals` precision; other numbers
/// render as plain decimal strings. Non-numeric values use their natural
/// string form, so the function is idempotent on already-formatted strings.
pub fn format_value(value: &Value, data_type: &str, decimals: usize) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| format_value(item, data_type, decimals))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Number(n) => {
            if data_type == "FLOAT32" {
                format!("{:.*}", decimals, n.as_f64().unwrap_or_default())
            } else if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().unwrap_or_default().to_string()
            }
        }
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Object(_) => value.to_string(),
    }
}

/// Render a timestamp in the viewer's local calendar form.
///
/// Accepts epoch milliseconds or an RFC 3339 string; anything else falls
/// back to the raw string representation.
pub fn format_timestamp(value: &Value) -> String {
    match value {
        Value::Number(n) => n
            .as_i64()
            .and_then(chrono::DateTime::from_timestamp_millis)
            .map(|dt| {
                dt.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|| n.to_string()),
        Value::String(s) => chrono::DateTime::parse_from_rfc3339(s)
            .map(|dt| {
                dt.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|_| s.clone()),
        other => other.to_string(),
    }
}

/// Epoch milliseconds for an RFC 3339 timestamp, if it parses.
pub fn parse_timestamp_ms(raw: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn float32_gets_fixed_precision() {
        assert_eq!(format_value(&json!(231.2), "FLOAT32", 2), "231.20");
        assert_eq!(format_value(&json!(1.005), "FLOAT32", 1), "1.0");
        assert_eq!(format_value(&json!(0), "FLOAT32", 2), "0.00");
    }

    #[test]
    fn other_numeric_types_render_plain() {
        assert_eq!(format_value(&json!(42), "UINT16", 2), "42");
        assert_eq!(format_value(&json!(-7), "INT32", 2), "-7");
        assert_eq!(format_value(&json!(12.5), "UINT16", 2), "12.5");
    }

    #[test]
    fn distributes_over_sequences() {
        assert_eq!(
            format_value(&json!([1.5, 2.25]), "FLOAT32", 2),
            "1.50, 2.25"
        );
        assert_eq!(format_value(&json!([1, 2, 3]), "UINT16", 2), "1, 2, 3");
    }

    #[test]
    fn idempotent_on_strings() {
        let once = format_value(&json!("231.20"), "FLOAT32", 2);
        assert_eq!(once, "231.20");
        let twice = format_value(&Value::String(once.clone()), "FLOAT32", 2);
        assert_eq!(once, twice);
    }

    #[test]
    fn non_numeric_values_use_natural_form() {
        assert_eq!(format_value(&json!(true), "FLOAT32", 2), "true");
        assert_eq!(format_value(&Value::Null, "FLOAT32", 2), "null");
    }

    #[test]
    fn timestamp_from_rfc3339() {
        let rendered = format_timestamp(&json!("2025-01-16T12:34:56+00:00"));
        // Exact local rendering depends on the viewer's zone; shape is pinned.
        assert_eq!(rendered.len(), "2025-01-16 12:34:56".len());
        assert!(rendered.contains(':'));
    }

    #[test]
    fn timestamp_falls_back_to_raw_string() {
        assert_eq!(format_timestamp(&json!("not a date")), "not a date");
    }

    #[test]
    fn parse_timestamp_roundtrip() {
        let ms = parse_timestamp_ms("1970-01-01T00:00:01+00:00").unwrap();
        assert_eq!(ms, 1000);
        assert!(parse_timestamp_ms("garbage").is_none());
    }
}
