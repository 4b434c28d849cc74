//! Client side of the lead forms: per-form state, widget-level validation
//! and the transport that posts envelopes to the mail endpoint.

pub mod fields;
pub mod form;
pub mod transport;

pub use fields::{CalculatorField, QuoteField};
pub use form::{
    CalculatorForm, FormClosed, FormError, FormRecord, FormStatus, LeadForm, QuoteForm, CONFIRMATION_DELAY,
};
pub use transport::{HttpTransport, SubmissionTransport, TransportError};
