//! Field-level diff summaries for audit entries

use serde_json::Value;

/// Longest string value shown in full before truncating
const MAX_SHOWN_CHARS: usize = 40;

/// Summarize the top-level fields that differ between two JSON snapshots
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes: Vec<String> = before_obj
                .iter()
                .filter_map(|(key, old)| match after_obj.get(key) {
                    Some(new) if new == old => None,
                    Some(new) => Some(format!("{}: {} -> {}", key, show(old), show(new))),
                    None => Some(format!("{}: {} -> (removed)", key, show(old))),
                })
                .collect();

            changes.extend(
                after_obj
                    .iter()
                    .filter(|(key, _)| !before_obj.contains_key(*key))
                    .map(|(key, new)| format!("{}: (added) -> {}", key, show(new))),
            );
            changes
        }
        _ if before != after => vec![format!("{} -> {}", show(before), show(after))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn show(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_SHOWN_CHARS => {
            let head: String = s.chars().take(MAX_SHOWN_CHARS - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields_only() {
        let before = json!({"name": "Widget", "price": 1999, "quantity": 100});
        let after = json!({"name": "Widget", "price": 2499, "quantity": 100});

        assert_eq!(generate_diff(&before, &after).unwrap(), "price: 1999 -> 2499");
    }

    #[test]
    fn test_string_change_is_quoted() {
        let before = json!({"email": "old@example.com"});
        let after = json!({"email": "new@example.com"});

        assert_eq!(
            generate_diff(&before, &after).unwrap(),
            "email: \"old@example.com\" -> \"new@example.com\""
        );
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"status": "pending", "note": "x"});
        let after = json!({"status": "pending", "profit": 4500});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("note: \"x\" -> (removed)"));
        assert!(diff.contains("profit: (added) -> 4500"));
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"status": "shipped"});
        assert!(generate_diff(&value, &value).is_none());
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(generate_diff(&json!(true), &json!(false)).unwrap(), "true -> false");
    }

    #[test]
    fn test_long_strings_truncated_on_char_boundary() {
        let before = json!({"address": "é".repeat(60)});
        let after = json!({"address": "short"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("...\" -> \"short\""));
    }
}
