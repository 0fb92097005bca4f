//! Field-level diff summaries for audit entries

use serde_json::Value;

/// Summarise top-level field changes between two JSON values
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        key,
                        format_value(before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            if changes.is_empty() {
                None
            } else {
                Some(changes.join(", "))
            }
        }
        _ if before != after => Some(format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )),
        _ => None,
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_change() {
        let diff = generate_diff(
            &json!({"legal_name": "Acme", "tax_id": "20123456789"}),
            &json!({"legal_name": "Acme S.A.", "tax_id": "20123456789"}),
        );
        assert_eq!(diff.as_deref(), Some("legal_name: \"Acme\" -> \"Acme S.A.\""));
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"tax_id": "20123456789"});
        assert_eq!(generate_diff(&value, &value), None);
    }

    #[test]
    fn test_added_and_removed_fields() {
        let diff = generate_diff(&json!({"a": 1}), &json!({"b": true})).unwrap();
        assert!(diff.contains("a: 1 -> (removed)"));
        assert!(diff.contains("b: (added) -> true"));
    }

    #[test]
    fn test_long_string_truncation_respects_char_boundaries() {
        let long = "ñ".repeat(60);
        let diff = generate_diff(&json!({"n": "x"}), &json!({"n": long})).unwrap();
        assert!(diff.ends_with("...\""));
    }

    #[test]
    fn test_non_object_values() {
        assert_eq!(
            generate_diff(&json!(1), &json!(2)).as_deref(),
            Some("1 -> 2")
        );
        assert_eq!(generate_diff(&json!([1]), &json!([1])), None);
    }
}
