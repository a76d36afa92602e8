use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Duration;
use serde::Serialize;
use tracing::debug;

use super::clock::Clock;
use super::controller::{SubmissionController, SubmissionResult, SubmitRejected};
use super::gateway::LeadGateway;
use super::payload::SubmissionContext;
use crate::form::{FieldErrors, FormDraft, FormState, Locale, SelectionError};

/// Knobs shared by every submission the service handles.
#[derive(Debug, Clone)]
pub struct IntakeSettings {
    pub default_locale: Locale,
    pub message_ttl: Duration,
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            message_ttl: Duration::seconds(super::controller::DEFAULT_MESSAGE_TTL_SECS),
        }
    }
}

/// Normalised draft together with the errors a submit would raise.
#[derive(Debug, Clone, Serialize)]
pub struct FormPreview {
    pub locale: Locale,
    pub valid: bool,
    pub state: FormState,
    pub errors: FieldErrors,
}

/// Outcome of a submission that reached the endpoint.
#[derive(Debug, Clone)]
pub struct LeadOutcome {
    pub result: SubmissionResult,
    pub state_after: FormState,
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Rejected(#[from] SubmitRejected),
}

type Sessions = Mutex<HashMap<String, SubmissionController>>;

/// Runs posted drafts through the form engine and the submission lifecycle.
///
/// Each form instance (see [`FormDraft::session_key`]) has one controller for as
/// long as its request is in flight, so a repeat post of the same form is refused
/// until the endpoint answers.
pub struct LeadIntakeService<G> {
    gateway: Arc<G>,
    clock: Arc<dyn Clock>,
    settings: IntakeSettings,
    sessions: Sessions,
}

impl<G> LeadIntakeService<G>
where
    G: LeadGateway + 'static,
{
    pub fn new(gateway: Arc<G>, clock: Arc<dyn Clock>, settings: IntakeSettings) -> Self {
        Self {
            gateway,
            clock,
            settings,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn default_locale(&self) -> Locale {
        self.settings.default_locale
    }

    pub fn preview(&self, draft: FormDraft) -> Result<FormPreview, IntakeError> {
        let locale = draft.locale_or(self.settings.default_locale);
        let form = draft.into_form(locale)?;
        let errors = form.validate().err().unwrap_or_default();

        Ok(FormPreview {
            locale,
            valid: errors.is_empty(),
            state: form.state().clone(),
            errors,
        })
    }

    pub async fn submit(&self, draft: FormDraft) -> Result<LeadOutcome, IntakeError> {
        let locale = draft.locale_or(self.settings.default_locale);
        let key = draft.session_key();
        let page_url = draft.page_url.clone().unwrap_or_default();
        let mut form = draft.into_form(locale)?;
        let context = SubmissionContext::new(locale, page_url);

        let ticket = {
            let mut sessions = lock_sessions(&self.sessions);
            let controller = sessions.entry(key.clone()).or_insert_with(|| self.controller(locale));
            match controller.begin(&form, &context) {
                Ok(ticket) => ticket,
                Err(rejected) => {
                    if controller.can_submit() {
                        sessions.remove(&key);
                    }
                    return Err(rejected.into());
                }
            }
        };
        let release = SessionRelease {
            sessions: &self.sessions,
            key: &key,
        };

        let outcome = self.gateway.submit(ticket.payload()).await;

        let result = {
            let mut sessions = lock_sessions(release.sessions);
            let controller = sessions.entry(key.clone()).or_insert_with(|| self.controller(locale));
            controller.complete(ticket, outcome, &mut form)
        };
        drop(release);

        Ok(LeadOutcome {
            result,
            state_after: form.state().clone(),
        })
    }

    fn controller(&self, locale: Locale) -> SubmissionController {
        SubmissionController::with_message_ttl(
            self.clock.clone(),
            locale.translations(),
            self.settings.message_ttl,
        )
    }

    /// Form instances with a request currently in flight.
    pub fn in_flight(&self) -> usize {
        lock_sessions(&self.sessions).len()
    }
}

fn lock_sessions(sessions: &Sessions) -> MutexGuard<'_, HashMap<String, SubmissionController>> {
    sessions
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Frees a form's session once its request settles or its future is dropped.
struct SessionRelease<'a> {
    sessions: &'a Sessions,
    key: &'a str,
}

impl Drop for SessionRelease<'_> {
    fn drop(&mut self) {
        lock_sessions(self.sessions).remove(self.key);
        debug!(session = self.key, "form session released");
    }
}
