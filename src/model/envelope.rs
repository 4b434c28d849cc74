use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::model::calculator_request::CalculatorRequest;
use crate::model::lenient::is_truthy;
use crate::model::quote_request::QuoteRequest;

/// Request kind carried in the envelope's `type` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Quote,
    Calculator,
}

impl RequestKind {
    pub fn tag(&self) -> &'static str {
        match self {
            RequestKind::Quote => "QUOTE",
            RequestKind::Calculator => "CALCULATOR",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "QUOTE" => Some(RequestKind::Quote),
            "CALCULATOR" => Some(RequestKind::Calculator),
            _ => None,
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    #[error("Missing type or data")]
    MissingTypeOrData,

    #[error("Invalid request type")]
    InvalidType,
}

/// `{ "type": ..., "data": ... }` as posted by the form client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SubmissionEnvelope {
    #[serde(rename = "QUOTE")]
    Quote(QuoteRequest),
    #[serde(rename = "CALCULATOR")]
    Calculator(CalculatorRequest),
}

impl SubmissionEnvelope {
    pub fn kind(&self) -> RequestKind {
        match self {
            SubmissionEnvelope::Quote(_) => RequestKind::Quote,
            SubmissionEnvelope::Calculator(_) => RequestKind::Calculator,
        }
    }

    /// Decode an inbound request body.
    ///
    /// The tag and payload must both be present and truthy before the tag is
    /// looked at, so `{}` and `{"type": "BOGUS"}` both report missing fields.
    /// Any truthy payload is accepted; one that is not an object carries no
    /// fields.
    pub fn from_value(body: Value) -> Result<Self, EnvelopeError> {
        let mut object = match body {
            Value::Object(map) => map,
            _ => return Err(EnvelopeError::MissingTypeOrData),
        };

        let tag = object
            .remove("type")
            .filter(is_truthy)
            .ok_or(EnvelopeError::MissingTypeOrData)?;
        let data = object
            .remove("data")
            .filter(is_truthy)
            .ok_or(EnvelopeError::MissingTypeOrData)?;

        let kind = tag
            .as_str()
            .and_then(RequestKind::from_tag)
            .ok_or(EnvelopeError::InvalidType)?;

        Ok(match kind {
            RequestKind::Quote => SubmissionEnvelope::Quote(decode_record(data)),
            RequestKind::Calculator => SubmissionEnvelope::Calculator(decode_record(data)),
        })
    }
}

fn decode_record<T: DeserializeOwned + Default>(data: Value) -> T {
    let fields = match data {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    serde_json::from_value(Value::Object(fields)).unwrap_or_else(|e| {
        warn!("[envelope] Undecodable submission data, rendering empty record: {}", e);
        T::default()
    })
}
