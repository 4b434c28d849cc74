use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidationError};

use crate::model::lenient;

/// Property type options offered by the quote form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    #[default]
    Apartment,
    Villa,
    Commercial,
}

impl PropertyType {
    pub const ALL: [PropertyType; 3] = [PropertyType::Apartment, PropertyType::Villa, PropertyType::Commercial];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::Villa => "Villa",
            PropertyType::Commercial => "Commercial",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown property type: {}", s))
    }
}

/// Quote or free site visit inquiry.
///
/// Text fields stay plain strings on the wire; the backend renders whatever
/// it receives and never rejects a submission for an empty optional field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(default, deserialize_with = "lenient::text")]
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,

    #[serde(default, deserialize_with = "lenient::text")]
    #[validate(custom(function = "optional_email"))]
    pub email: String,

    #[serde(default, deserialize_with = "lenient::text")]
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub property_size: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub property_type: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub work_required: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub location: String,

    /// Set by the visit-only form mode; classification never relies on it
    #[serde(
        rename = "isVisitOnly",
        default,
        deserialize_with = "lenient::flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub requested_visit_only: Option<bool>,
}

impl QuoteRequest {
    /// Blank record as the quote form opens it
    pub fn blank() -> Self {
        QuoteRequest {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            property_size: String::new(),
            property_type: PropertyType::default().as_str().to_string(),
            work_required: String::new(),
            location: String::new(),
            requested_visit_only: None,
        }
    }

    /// Blank record for the free site visit form
    pub fn blank_visit() -> Self {
        QuoteRequest {
            requested_visit_only: Some(true),
            ..Self::blank()
        }
    }

    /// A quote without a work description is a request for a free site visit.
    pub fn is_visit_only(&self) -> bool {
        self.work_required.trim().is_empty()
    }
}

#[allow(clippy::ptr_arg)]
fn optional_email(email: &String) -> Result<(), ValidationError> {
    if email.is_empty() || email.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_visit_only_derived_from_work_field() {
        let mut request = QuoteRequest::blank();
        assert!(request.is_visit_only());

        request.work_required = "   \n\t".to_string();
        assert!(request.is_visit_only());

        request.work_required = "Full kitchen renovation".to_string();
        assert!(!request.is_visit_only());
    }

    #[test]
    fn test_explicit_flag_does_not_override_classification() {
        let mut request = QuoteRequest::blank_visit();
        request.work_required = "Bathroom tiling".to_string();
        assert!(!request.is_visit_only());

        let mut request = QuoteRequest::blank();
        request.requested_visit_only = Some(false);
        assert!(request.is_visit_only());
    }

    #[test]
    fn test_wire_names() {
        let value = serde_json::to_value(QuoteRequest::blank_visit()).unwrap();
        assert_eq!(value["fullName"], "");
        assert_eq!(value["propertyType"], "Apartment");
        assert_eq!(value["isVisitOnly"], true);

        let value = serde_json::to_value(QuoteRequest::blank()).unwrap();
        assert!(value.get("isVisitOnly").is_none());
    }

    #[test]
    fn test_missing_fields_decode_empty() {
        let request: QuoteRequest = serde_json::from_value(json!({ "fullName": "Jane Doe" })).unwrap();
        assert_eq!(request.full_name, "Jane Doe");
        assert_eq!(request.property_type, "");
        assert_eq!(request.requested_visit_only, None);
    }

    #[test]
    fn test_validation() {
        let mut request = QuoteRequest::blank();
        assert!(request.validate().is_err());

        request.full_name = "Jane Doe".to_string();
        request.phone = "+971500000000".to_string();
        assert!(request.validate().is_ok());

        request.email = "not-an-email".to_string();
        assert!(request.validate().is_err());

        request.email = "jane@example.com".to_string();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_property_type_parse() {
        assert_eq!("Villa".parse::<PropertyType>(), Ok(PropertyType::Villa));
        assert!("Castle".parse::<PropertyType>().is_err());
        assert_eq!(PropertyType::default(), PropertyType::Apartment);
    }
}
