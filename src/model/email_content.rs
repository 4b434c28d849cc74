use serde::Serialize;

/// Rendered notification, ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
    pub text: String,
}
