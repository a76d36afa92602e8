use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::locale::FormTranslations;
use super::phone::is_phone_valid;
use super::state::{FormField, FormState};

fn e164_shape() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+?[1-9]\d{1,14}$").expect("static phone pattern"))
}

fn email_shape() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
        )
        .expect("static email pattern")
    })
}

/// Field-scoped validation messages, ordered by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }

    fn insert(&mut self, field: FormField, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

/// Letters and whitespace only; everything else is dropped as it is typed.
pub fn sanitize_name_input(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect()
}

pub fn is_email_shaped(value: &str) -> bool {
    email_shape().is_match(value.trim())
}

/// Run every field rule against `state`.
pub fn validate(state: &FormState, translations: &FormTranslations) -> Result<(), FieldErrors> {
    let inputs = &translations.inputs;
    let mut errors = FieldErrors::default();

    if state.name.trim().is_empty() {
        errors.insert(FormField::Name, &inputs.name.error);
    }
    if state.surname.trim().is_empty() {
        errors.insert(FormField::Surname, &inputs.surname.error);
    }
    if state.country_code.trim().is_empty() {
        errors.insert(FormField::CountryCode, &inputs.country_code.error);
    }

    let phone = state.phone.trim();
    let country_code = Some(state.country_code.as_str()).filter(|code| !code.trim().is_empty());
    if phone.is_empty() || !e164_shape().is_match(phone) || !is_phone_valid(phone, country_code) {
        errors.insert(FormField::Phone, &inputs.phone.error);
    }

    if !is_email_shaped(&state.email) {
        errors.insert(FormField::Email, &inputs.email.error);
    }
    if state.residence_type.is_empty() {
        errors.insert(FormField::ResidenceType, &inputs.residence_type.error);
    }
    if state.how_did_you_hear_about_us.is_empty() {
        errors.insert(
            FormField::HowDidYouHearAboutUs,
            &inputs.how_did_you_hear_about_us.error,
        );
    }
    if !state.consent {
        errors.insert(FormField::Consent, &inputs.consent.error);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
