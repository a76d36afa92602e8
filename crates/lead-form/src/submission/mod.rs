//! Submission lifecycle for the contact form and delivery to the CRM lead
//! endpoint.

pub mod clock;
pub mod controller;
pub mod gateway;
pub mod payload;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{
    InFlight, ResultKind, SubmissionController, SubmissionResult, SubmissionState, SubmitRejected,
};
pub use gateway::{interpret_response, GatewayError, HttpLeadGateway, LeadGateway, LeadReceipt};
pub use payload::{LeadPayload, SubmissionContext, UTM_KEYS};
pub use router::lead_router;
pub use service::{FormPreview, IntakeError, IntakeSettings, LeadIntakeService, LeadOutcome};
