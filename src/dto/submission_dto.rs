use serde::{Deserialize, Serialize};

/// Body of a successful submission response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
}

impl SubmissionResponse {
    pub fn sent() -> Self {
        SubmissionResponse {
            success: true,
            message: "Email sent successfully".to_string(),
        }
    }
}
