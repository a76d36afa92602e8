use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::clock::Clock;
use super::gateway::{GatewayError, LeadGateway, LeadReceipt};
use super::payload::{LeadPayload, SubmissionContext};
use crate::form::{ContactForm, FieldErrors, FormTranslations};

pub const DEFAULT_MESSAGE_TTL_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Success,
    Error,
}

/// Banner shown after the endpoint answers; visible until `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionResult {
    pub kind: ResultKind,
    pub text: String,
    pub expires_at: DateTime<Utc>,
}

impl SubmissionResult {
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Lifecycle of one form's submission. `Validating` only exists for the
/// duration of a `begin` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Success(SubmissionResult),
    Error(SubmissionResult),
}

impl SubmissionState {
    pub const fn label(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Success(_) => "success",
            SubmissionState::Error(_) => "error",
        }
    }
}

/// Proof that a request is in flight. Only [`SubmissionController::begin`]
/// hands these out and [`SubmissionController::complete`] consumes them.
#[derive(Debug)]
pub struct InFlight {
    payload: LeadPayload,
}

impl InFlight {
    pub fn payload(&self) -> &LeadPayload {
        &self.payload
    }
}

/// Why a submit action did not produce a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(FieldErrors),
}

/// Drives validate → submit → result → idle for a single form.
pub struct SubmissionController {
    state: SubmissionState,
    clock: Arc<dyn Clock>,
    translations: FormTranslations,
    message_ttl: Duration,
}

impl SubmissionController {
    pub fn new(clock: Arc<dyn Clock>, translations: FormTranslations) -> Self {
        Self::with_message_ttl(
            clock,
            translations,
            Duration::seconds(DEFAULT_MESSAGE_TTL_SECS),
        )
    }

    pub fn with_message_ttl(
        clock: Arc<dyn Clock>,
        translations: FormTranslations,
        message_ttl: Duration,
    ) -> Self {
        Self {
            state: SubmissionState::Idle,
            clock,
            translations,
            message_ttl,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Submit control availability.
    pub fn can_submit(&self) -> bool {
        !matches!(self.state, SubmissionState::Submitting)
    }

    pub fn submit_label(&self) -> &str {
        if self.can_submit() {
            &self.translations.submit.default
        } else {
            &self.translations.submit.sending
        }
    }

    /// Banner currently on screen, if its lifetime has not run out.
    pub fn message(&self) -> Option<&SubmissionResult> {
        let now = self.clock.now();
        match &self.state {
            SubmissionState::Success(result) | SubmissionState::Error(result)
                if result.is_visible_at(now) =>
            {
                Some(result)
            }
            _ => None,
        }
    }

    /// Timer callback: drop an expired banner and return to `Idle`.
    pub fn tick(&mut self) {
        let expired = match &self.state {
            SubmissionState::Success(result) | SubmissionState::Error(result) => {
                !result.is_visible_at(self.clock.now())
            }
            _ => false,
        };
        if expired {
            self.state = SubmissionState::Idle;
        }
    }

    /// Validate `form` and, when it passes, move to `Submitting` with the
    /// payload to deliver. A previous banner is cleared by the attempt.
    pub fn begin(
        &mut self,
        form: &ContactForm,
        context: &SubmissionContext,
    ) -> Result<InFlight, SubmitRejected> {
        if !self.can_submit() {
            warn!("submit ignored while a request is in flight");
            return Err(SubmitRejected::InFlight);
        }

        self.state = SubmissionState::Validating;
        if let Err(errors) = form.validate() {
            self.state = SubmissionState::Idle;
            info!(invalid_fields = errors.len(), "contact form failed validation");
            return Err(SubmitRejected::Invalid(errors));
        }

        let payload = LeadPayload::build(form.state(), context);
        self.state = SubmissionState::Submitting;
        info!(locale = context.locale.as_str(), "submitting contact form");
        Ok(InFlight { payload })
    }

    /// Record the endpoint's answer. Success resets the form; failure keeps it
    /// for a retry.
    pub fn complete(
        &mut self,
        ticket: InFlight,
        outcome: Result<LeadReceipt, GatewayError>,
        form: &mut ContactForm,
    ) -> SubmissionResult {
        drop(ticket);
        let expires_at = self.clock.now() + self.message_ttl;

        let result = match outcome {
            Ok(receipt) => {
                form.reset();
                info!("lead accepted by endpoint");
                SubmissionResult {
                    kind: ResultKind::Success,
                    text: receipt
                        .message
                        .filter(|text| !text.trim().is_empty())
                        .unwrap_or_else(|| self.translations.messages.success.clone()),
                    expires_at,
                }
            }
            Err(err) => {
                warn!(error = %err, "lead submission failed");
                SubmissionResult {
                    kind: ResultKind::Error,
                    text: err
                        .server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| self.translations.messages.error.clone()),
                    expires_at,
                }
            }
        };

        self.state = match result.kind {
            ResultKind::Success => SubmissionState::Success(result.clone()),
            ResultKind::Error => SubmissionState::Error(result.clone()),
        };
        result
    }

    /// Give up on a request whose answer will never arrive (timeout, dropped
    /// connection). The form is left untouched and no banner is shown.
    pub fn abandon(&mut self, ticket: InFlight) {
        drop(ticket);
        self.release();
    }

    fn release(&mut self) {
        if matches!(self.state, SubmissionState::Submitting) {
            warn!("in-flight submission abandoned");
            self.state = SubmissionState::Idle;
        }
    }

    /// One full submit action: validate, deliver through `gateway`, settle.
    pub async fn submit<G>(
        &mut self,
        form: &mut ContactForm,
        context: &SubmissionContext,
        gateway: &G,
    ) -> Result<SubmissionResult, SubmitRejected>
    where
        G: LeadGateway + ?Sized,
    {
        let ticket = self.begin(form, context)?;
        let mut pending = ReleaseOnDrop {
            controller: self,
            armed: true,
        };
        let outcome = gateway.submit(ticket.payload()).await;
        pending.armed = false;
        Ok(pending.controller.complete(ticket, outcome, form))
    }
}

/// Returns the controller to `Idle` if a `submit` future is dropped mid-request.
struct ReleaseOnDrop<'a> {
    controller: &'a mut SubmissionController,
    armed: bool,
}

impl Drop for ReleaseOnDrop<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.controller.release();
        }
    }
}

impl std::fmt::Debug for SubmissionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionController")
            .field("state", &self.state)
            .field("message_ttl", &self.message_ttl)
            .finish()
    }
}
