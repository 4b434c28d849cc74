use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::model::SubmissionEnvelope;
use crate::util::email::EmailDispatcher;
use crate::util::email_template::render_submission;
use crate::util::error::ServiceError;

#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Format the submission and hand it to the dispatcher; no retries.
    async fn submit(&self, envelope: SubmissionEnvelope) -> Result<(), ServiceError>;
}

pub struct SubmissionServiceImpl {
    dispatcher: Arc<dyn EmailDispatcher>,
}

impl SubmissionServiceImpl {
    pub fn new(dispatcher: Arc<dyn EmailDispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl SubmissionService for SubmissionServiceImpl {
    #[instrument(skip(self, envelope), fields(kind = %envelope.kind()))]
    async fn submit(&self, envelope: SubmissionEnvelope) -> Result<(), ServiceError> {
        if let SubmissionEnvelope::Quote(data) = &envelope {
            info!(visit_only = data.is_visit_only(), "Classified quote submission");
        }

        let content = render_submission(&envelope);
        info!(subject = %content.subject, "Dispatching lead notification");

        self.dispatcher.dispatch(&content).await.map_err(|e| {
            error!("Lead notification not delivered: {}", e);
            ServiceError::DispatchFailed(e.to_string())
        })
    }
}
