use serde::Deserialize;

use super::consent::ConsentState;
use super::locale::Locale;
use super::selection::SelectionError;
use super::state::{TextField, DEFAULT_COUNTRY_CODE};
use super::{ContactForm, SelectField};

/// A form as posted by a browser: raw inputs, checked option ids and consent
/// flags, plus the page context the lead was captured on. `form_id` names the
/// browser's form instance when the client sends one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormDraft {
    pub name: String,
    pub surname: String,
    pub country_code: Option<String>,
    pub phone: String,
    pub email: String,
    pub residence_types: Vec<String>,
    pub referral_sources: Vec<String>,
    pub message: String,
    pub consent: bool,
    pub consent_electronic_message: bool,
    pub consent_sms: bool,
    pub consent_email: bool,
    pub consent_phone: bool,
    pub locale: Option<String>,
    pub page_url: Option<String>,
    pub form_id: Option<String>,
}

impl FormDraft {
    pub fn locale_or(&self, fallback: Locale) -> Locale {
        Locale::parse_or(self.locale.as_deref(), fallback)
    }

    /// Identity of the form instance this draft was posted from: the client's
    /// `formId`, or the contact details when none was sent.
    pub fn session_key(&self) -> String {
        match self.form_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => format!("form:{id}"),
            _ => format!(
                "contact:{}|{}|{}",
                self.email.trim().to_lowercase(),
                self.country_code.as_deref().unwrap_or(DEFAULT_COUNTRY_CODE).trim(),
                self.phone.trim()
            ),
        }
    }

    /// Replay the draft into a fresh form the same way a user would fill it in.
    pub fn into_form(self, locale: Locale) -> Result<ContactForm, SelectionError> {
        let mut form = ContactForm::new(locale);

        form.set_text(TextField::Name, &self.name);
        form.set_text(TextField::Surname, &self.surname);
        form.set_text(
            TextField::CountryCode,
            self.country_code.as_deref().unwrap_or(DEFAULT_COUNTRY_CODE),
        );
        form.set_text(TextField::Phone, &self.phone);
        form.set_text(TextField::Email, self.email.trim());
        form.set_text(TextField::Message, &self.message);

        for id in &self.residence_types {
            form.toggle(SelectField::ResidenceType, id, true)?;
        }
        for id in &self.referral_sources {
            form.toggle(SelectField::HowDidYouHearAboutUs, id, true)?;
        }

        form.apply_consents(ConsentState {
            consent: self.consent,
            electronic_message: self.consent_electronic_message,
            sms: self.consent_sms,
            email: self.consent_email,
            phone: self.consent_phone,
        });

        Ok(form)
    }
}
