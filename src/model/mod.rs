pub mod calculator_request;
pub mod email_content;
pub mod envelope;
pub mod lenient;
pub mod quote_request;

pub use calculator_request::{CalculatorRequest, SquareMeters};
pub use email_content::EmailContent;
pub use envelope::{EnvelopeError, RequestKind, SubmissionEnvelope};
pub use quote_request::{PropertyType, QuoteRequest};
