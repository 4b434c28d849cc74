use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::model::lenient;

/// Floor area as posted.
///
/// The calculator widget only produces whole numbers; anything else a client
/// posts is kept verbatim so it still reaches the email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareMeters {
    Whole(i64),
    Verbatim(String),
}

impl SquareMeters {
    /// Text for the email; `""` when nothing was entered
    pub fn display_text(&self) -> String {
        match self {
            SquareMeters::Whole(0) => String::new(),
            SquareMeters::Whole(n) => n.to_string(),
            SquareMeters::Verbatim(s) => s.clone(),
        }
    }

    fn from_value(value: Value) -> Self {
        match &value {
            Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    return SquareMeters::Whole(v);
                }
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => SquareMeters::Whole(f as i64),
                    _ => SquareMeters::Verbatim(n.to_string()),
                }
            }
            Value::String(s) if s.trim().is_empty() => SquareMeters::Whole(0),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(SquareMeters::Whole)
                .unwrap_or_else(|_| SquareMeters::Verbatim(s.clone())),
            other => match lenient::display_text(other) {
                text if text.is_empty() => SquareMeters::Whole(0),
                text => SquareMeters::Verbatim(text),
            },
        }
    }
}

impl Default for SquareMeters {
    fn default() -> Self {
        SquareMeters::Whole(0)
    }
}

impl From<i64> for SquareMeters {
    fn from(value: i64) -> Self {
        SquareMeters::Whole(value)
    }
}

impl PartialEq<i64> for SquareMeters {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, SquareMeters::Whole(n) if n == other)
    }
}

impl Serialize for SquareMeters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SquareMeters::Whole(n) => serializer.serialize_i64(*n),
            SquareMeters::Verbatim(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for SquareMeters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(SquareMeters::from_value)
    }
}

/// Cost estimate inquiry from the calculator form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorRequest {
    #[serde(default)]
    #[validate(custom(function = "at_least_one_square_meter"))]
    pub square_meters: SquareMeters,

    #[serde(default, deserialize_with = "lenient::text")]
    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[serde(default, deserialize_with = "lenient::text")]
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
}

impl CalculatorRequest {
    pub fn blank() -> Self {
        Self::default()
    }
}

fn at_least_one_square_meter(value: &SquareMeters) -> Result<(), ValidationError> {
    match value {
        SquareMeters::Whole(n) if *n >= 1 => Ok(()),
        _ => Err(ValidationError::new("range").with_message("Square meters must be at least 1".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn area_of(value: Value) -> SquareMeters {
        serde_json::from_value::<CalculatorRequest>(json!({ "squareMeters": value }))
            .unwrap()
            .square_meters
    }

    #[test]
    fn test_wire_shape() {
        let request = CalculatorRequest {
            square_meters: 150.into(),
            email: "a@b.com".to_string(),
            phone: "123".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "squareMeters": 150, "email": "a@b.com", "phone": "123" })
        );
    }

    #[test]
    fn test_lenient_decode() {
        let request: CalculatorRequest = serde_json::from_value(json!({ "squareMeters": "85" })).unwrap();
        assert_eq!(request.square_meters, 85);
        assert_eq!(request.email, "");

        let request: CalculatorRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request.square_meters, 0);
    }

    #[test]
    fn test_square_meters_forms() {
        assert_eq!(area_of(json!(150.0)), 150);
        assert_eq!(area_of(json!("  42 ")), 42);
        assert_eq!(area_of(json!("")), 0);
        assert_eq!(area_of(Value::Null), 0);
        assert_eq!(area_of(json!(false)), 0);
        assert_eq!(area_of(json!(12.5)), SquareMeters::Verbatim("12.5".to_string()));
        assert_eq!(area_of(json!("150 sqm")), SquareMeters::Verbatim("150 sqm".to_string()));
        assert_eq!(area_of(json!([150])), SquareMeters::Verbatim("150".to_string()));
    }

    #[test]
    fn test_display_text() {
        assert_eq!(SquareMeters::Whole(0).display_text(), "");
        assert_eq!(SquareMeters::Whole(-3).display_text(), "-3");
        assert_eq!(SquareMeters::Verbatim("12.5".to_string()).display_text(), "12.5");
    }

    #[test]
    fn test_validation() {
        let mut request = CalculatorRequest::blank();
        request.email = "a@b.com".to_string();
        request.phone = "123".to_string();
        assert!(request.validate().is_err());

        request.square_meters = 1.into();
        assert!(request.validate().is_ok());

        request.square_meters = SquareMeters::Verbatim("12.5".to_string());
        assert!(request.validate().is_err());

        request.square_meters = 1.into();
        request.email = String::new();
        assert!(request.validate().is_err());
    }
}
