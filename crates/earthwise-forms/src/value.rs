//! Dynamic field values.

use serde_json::{Map, Value};

/// The value held by one form field.
pub type FieldValue = Value;

/// Current values of a form, keyed by field name.
pub type FormData = Map<String, Value>;

/// Returns whether a value counts as "not entered": null, `""` or `[]`.
pub fn is_empty(value: &FieldValue) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Returns whether a value carries data for the form status banner.
///
/// Unlike [`is_empty`], an empty array still counts as data.
pub(crate) fn has_content(value: &FieldValue) -> bool {
    !matches!(value, Value::Null) && value.as_str() != Some("")
}

/// Renders a value the way an input element shows it.
pub fn display_value(value: &FieldValue) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_empty() {
        assert!(is_empty(&Value::Null));
        assert!(is_empty(&json!("")));
        assert!(is_empty(&json!([])));
        assert!(!is_empty(&json!(" ")));
        assert!(!is_empty(&json!(0)));
        assert!(!is_empty(&json!(false)));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&Value::Null), "");
        assert_eq!(display_value(&json!(42)), "42");
        assert_eq!(display_value(&json!(["a", "b"])), "a,b");
    }
}
