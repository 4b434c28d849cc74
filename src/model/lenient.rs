//! Field decoders for submission payloads.
//!
//! The mail endpoint renders whatever the browser sent, so no field value can
//! fail a request: absent, null or falsy values decode to their empty value and
//! anything else is kept as display text.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Text field: falsy values become `""`, everything else its display text.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null);
    Ok(display_text(&value))
}

/// Optional flag: anything but a JSON boolean is ignored.
pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => Some(b),
        _ => None,
    })
}

/// `null`, `false`, `0` and `""` count as not filled in.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text shown in the email for a posted value; `""` when it is not filled in.
pub fn display_text(value: &Value) -> String {
    if is_truthy(value) {
        stringify(value)
    } else {
        String::new()
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Lead {
        #[serde(default, deserialize_with = "text")]
        name: String,
        #[serde(default, deserialize_with = "flag")]
        toggle: Option<bool>,
    }

    fn name_of(value: Value) -> String {
        serde_json::from_value::<Lead>(json!({ "name": value })).unwrap().name
    }

    #[test]
    fn test_absent_and_null_fields() {
        let lead: Lead = serde_json::from_value(json!({})).unwrap();
        assert_eq!(lead.name, "");
        assert_eq!(lead.toggle, None);
        assert_eq!(name_of(Value::Null), "");
    }

    #[test]
    fn test_scalar_text_values() {
        assert_eq!(name_of(json!(971500000000u64)), "971500000000");
        assert_eq!(name_of(json!(12.5)), "12.5");
        assert_eq!(name_of(json!(150.0)), "150");
        assert_eq!(name_of(json!(true)), "true");
    }

    #[test]
    fn test_falsy_scalars_are_empty() {
        assert_eq!(name_of(json!(0)), "");
        assert_eq!(name_of(json!(false)), "");
        assert_eq!(name_of(json!("")), "");
    }

    #[test]
    fn test_structured_values_rendered() {
        assert_eq!(name_of(json!(["Dubai", null, 3])), "Dubai,,3");
        assert_eq!(name_of(json!([])), "");
        assert_eq!(name_of(json!({ "city": "Dubai" })), r#"{"city":"Dubai"}"#);
    }

    #[test]
    fn test_flag_ignores_non_booleans() {
        let lead: Lead = serde_json::from_value(json!({ "toggle": "yes" })).unwrap();
        assert_eq!(lead.toggle, None);
        let lead: Lead = serde_json::from_value(json!({ "toggle": true })).unwrap();
        assert_eq!(lead.toggle, Some(true));
    }
}
