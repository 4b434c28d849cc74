use std::time::Duration;
use tracing::{debug, error, info};
use validator::{Validate, ValidationErrors};

use crate::client::fields::{CalculatorField, QuoteField};
use crate::client::transport::{SubmissionTransport, TransportError};
use crate::model::{CalculatorRequest, PropertyType, QuoteRequest, SquareMeters, SubmissionEnvelope};

/// How long the confirmation stays up before the form closes itself
pub const CONFIRMATION_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field {0} is not part of this form")]
    FieldUnavailable(&'static str),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Form is incomplete: {0}")]
    Incomplete(ValidationErrors),

    #[error("A submission is already in progress")]
    AlreadySending,

    #[error("Form was already submitted")]
    AlreadySubmitted,

    #[error("Form has not been submitted")]
    NotSubmitted,

    #[error("Submission failed: {0}")]
    Transport(#[from] TransportError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    Sending,
    Submitted,
    /// Last attempt did not go through; the form stays editable
    Failed { reason: String },
}

/// Tells the owner of the form to close it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormClosed;

/// A record one of the lead forms collects
pub trait FormRecord: Clone + Validate + Send + Sync {
    type Field: std::str::FromStr<Err = FormError> + Copy + std::fmt::Debug;

    fn set(&mut self, field: Self::Field, value: &str) -> Result<(), FormError>;

    fn to_envelope(&self) -> SubmissionEnvelope;
}

impl FormRecord for QuoteRequest {
    type Field = QuoteField;

    fn set(&mut self, field: QuoteField, value: &str) -> Result<(), FormError> {
        let slot = match field {
            QuoteField::FullName => &mut self.full_name,
            QuoteField::Email => &mut self.email,
            QuoteField::Phone => &mut self.phone,
            QuoteField::PropertySize => &mut self.property_size,
            QuoteField::Location => &mut self.location,
            QuoteField::PropertyType => {
                let property_type = value.parse::<PropertyType>().map_err(|reason| FormError::InvalidValue {
                    field: field.name(),
                    reason,
                })?;
                self.property_type = property_type.as_str().to_string();
                return Ok(());
            }
            QuoteField::WorkRequired => {
                // the site visit form has no work description input
                if self.requested_visit_only == Some(true) {
                    return Err(FormError::FieldUnavailable(field.name()));
                }
                &mut self.work_required
            }
        };
        *slot = value.to_string();
        Ok(())
    }

    fn to_envelope(&self) -> SubmissionEnvelope {
        SubmissionEnvelope::Quote(self.clone())
    }
}

impl FormRecord for CalculatorRequest {
    type Field = CalculatorField;

    fn set(&mut self, field: CalculatorField, value: &str) -> Result<(), FormError> {
        match field {
            CalculatorField::SquareMeters => {
                let value = value.trim();
                if value.is_empty() {
                    self.square_meters = SquareMeters::default();
                    return Ok(());
                }
                let square_meters = value.parse::<i64>().map_err(|_| FormError::InvalidValue {
                    field: field.name(),
                    reason: "must be a whole number".to_string(),
                })?;
                if square_meters < 1 {
                    return Err(FormError::InvalidValue {
                        field: field.name(),
                        reason: "must be at least 1".to_string(),
                    });
                }
                self.square_meters = SquareMeters::Whole(square_meters);
            }
            CalculatorField::Email => self.email = value.to_string(),
            CalculatorField::Phone => self.phone = value.to_string(),
        }
        Ok(())
    }

    fn to_envelope(&self) -> SubmissionEnvelope {
        SubmissionEnvelope::Calculator(self.clone())
    }
}

/// State of one open lead form: the record being edited and where the
/// submission stands.
pub struct LeadForm<R: FormRecord> {
    blank: R,
    record: R,
    status: FormStatus,
}

pub type QuoteForm = LeadForm<QuoteRequest>;
pub type CalculatorForm = LeadForm<CalculatorRequest>;

impl LeadForm<QuoteRequest> {
    pub fn quote() -> Self {
        Self::new(QuoteRequest::blank())
    }

    /// Free site visit: same record, no work description
    pub fn site_visit() -> Self {
        Self::new(QuoteRequest::blank_visit())
    }

    pub fn is_visit_mode(&self) -> bool {
        self.blank.requested_visit_only == Some(true)
    }
}

impl LeadForm<CalculatorRequest> {
    pub fn calculator() -> Self {
        Self::new(CalculatorRequest::blank())
    }
}

impl<R: FormRecord> LeadForm<R> {
    pub fn new(blank: R) -> Self {
        LeadForm {
            record: blank.clone(),
            blank,
            status: FormStatus::Editing,
        }
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn update(&mut self, field: R::Field, value: &str) -> Result<(), FormError> {
        if self.status == FormStatus::Submitted {
            return Err(FormError::AlreadySubmitted);
        }
        self.record.set(field, value)
    }

    /// Same as [`update`](Self::update), addressing the field by its wire name
    pub fn update_named(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        let field = name.parse::<R::Field>()?;
        self.update(field, value)
    }

    pub async fn submit<T>(&mut self, transport: &T) -> Result<(), FormError>
    where
        T: SubmissionTransport + ?Sized,
    {
        match self.status {
            FormStatus::Sending => return Err(FormError::AlreadySending),
            FormStatus::Submitted => return Err(FormError::AlreadySubmitted),
            FormStatus::Editing | FormStatus::Failed { .. } => {}
        }

        self.record.validate().map_err(FormError::Incomplete)?;
        let envelope = self.record.to_envelope();
        info!(kind = %envelope.kind(), "Submitting lead form");

        let mut sending = SendingGuard::new(&mut self.status);
        match transport.send(&envelope).await {
            Ok(()) => {
                sending.settle(FormStatus::Submitted);
                Ok(())
            }
            Err(e) => {
                error!("Lead form submission failed: {}", e);
                sending.settle(FormStatus::Failed { reason: e.to_string() });
                Err(FormError::Transport(e))
            }
        }
    }

    /// Hold the confirmation for [`CONFIRMATION_DELAY`], then reset and close.
    pub async fn close_after_confirmation(&mut self) -> Result<FormClosed, FormError> {
        if self.status != FormStatus::Submitted {
            return Err(FormError::NotSubmitted);
        }
        tokio::time::sleep(CONFIRMATION_DELAY).await;
        self.record = self.blank.clone();
        self.status = FormStatus::Editing;
        Ok(FormClosed)
    }

    /// Discard the record without confirmation
    pub fn cancel(self) -> FormClosed {
        debug!("Lead form cancelled");
        FormClosed
    }
}

/// Marks the form as sending; a submit future dropped mid-flight leaves the
/// form failed instead of stuck in `Sending`.
struct SendingGuard<'a> {
    status: &'a mut FormStatus,
    settled: bool,
}

impl<'a> SendingGuard<'a> {
    fn new(status: &'a mut FormStatus) -> Self {
        *status = FormStatus::Sending;
        SendingGuard { status, settled: false }
    }

    fn settle(&mut self, outcome: FormStatus) {
        *self.status = outcome;
        self.settled = true;
    }
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            *self.status = FormStatus::Failed {
                reason: "Submission was interrupted".to_string(),
            };
        }
    }
}
