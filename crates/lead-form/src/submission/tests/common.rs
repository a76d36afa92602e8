use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::form::{ConsentField, ContactForm, FormDraft, Locale, SelectField, TextField};
use crate::submission::{
    GatewayError, IntakeSettings, LeadGateway, LeadIntakeService, LeadPayload, LeadReceipt,
    ManualClock, SubmissionContext,
};

pub(super) const PAGE_URL: &str =
    "https://citysresidences.com/iletisim?utm_source=google&utm_medium=cpc&utm_campaign=spring";

/// Gateway double answering every request with a canned outcome.
pub(super) struct MemoryGateway {
    outcome: Result<LeadReceipt, GatewayError>,
    payloads: Mutex<Vec<LeadPayload>>,
}

impl MemoryGateway {
    pub(super) fn accepting(message: &str) -> Self {
        Self::answering(Ok(LeadReceipt {
            message: Some(message.to_string()),
        }))
    }

    pub(super) fn answering(outcome: Result<LeadReceipt, GatewayError>) -> Self {
        Self {
            outcome,
            payloads: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn payloads(&self) -> Vec<LeadPayload> {
        self.payloads.lock().expect("payload mutex poisoned").clone()
    }
}

#[async_trait]
impl LeadGateway for MemoryGateway {
    async fn submit(&self, payload: &LeadPayload) -> Result<LeadReceipt, GatewayError> {
        self.payloads
            .lock()
            .expect("payload mutex poisoned")
            .push(payload.clone());
        self.outcome.clone()
    }
}

/// Accepts every lead, but only after `delay`.
pub(super) struct SlowGateway {
    delay: std::time::Duration,
    inner: MemoryGateway,
}

impl SlowGateway {
    pub(super) fn new(delay: std::time::Duration) -> Self {
        Self {
            delay,
            inner: MemoryGateway::accepting("Talebiniz alındı"),
        }
    }

    pub(super) fn payloads(&self) -> Vec<LeadPayload> {
        self.inner.payloads()
    }
}

#[async_trait]
impl LeadGateway for SlowGateway {
    async fn submit(&self, payload: &LeadPayload) -> Result<LeadReceipt, GatewayError> {
        tokio::time::sleep(self.delay).await;
        self.inner.submit(payload).await
    }
}

pub(super) fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::starting_at(
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
            .single()
            .expect("valid timestamp"),
    ))
}

pub(super) fn context() -> SubmissionContext {
    SubmissionContext::new(Locale::Tr, PAGE_URL)
}

pub(super) fn filled_form() -> ContactForm {
    let mut form = ContactForm::new(Locale::Tr);
    form.set_text(TextField::Name, "Ayşe");
    form.set_text(TextField::Surname, "Yılmaz");
    form.set_text(TextField::Phone, "555 123 45 67");
    form.set_text(TextField::Email, "ayse@example.com");
    form.set_text(TextField::Message, "3+1 daireler hakkında bilgi almak istiyorum.");
    form.toggle(SelectField::ResidenceType, "3+1", true)
        .expect("known layout");
    form.toggle(SelectField::HowDidYouHearAboutUs, "instagram", true)
        .expect("known source");
    form.set_consent(ConsentField::Consent, true);
    form.set_consent(ConsentField::Sms, true);
    form
}

pub(super) fn draft() -> FormDraft {
    FormDraft {
        name: "Ayşe".to_string(),
        surname: "Yılmaz".to_string(),
        phone: "5551234567".to_string(),
        email: "ayse@example.com".to_string(),
        residence_types: vec!["2+1".to_string()],
        referral_sources: vec!["google".to_string()],
        consent: true,
        locale: Some("en".to_string()),
        page_url: Some(PAGE_URL.to_string()),
        ..FormDraft::default()
    }
}

pub(super) fn service<G>(gateway: Arc<G>) -> Arc<LeadIntakeService<G>>
where
    G: LeadGateway + 'static,
{
    Arc::new(LeadIntakeService::new(
        gateway,
        clock(),
        IntakeSettings::default(),
    ))
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
