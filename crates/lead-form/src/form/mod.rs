//! Contact form engine: field state, consent rules, multi-selects and validation.

mod catalog;
pub mod consent;
mod draft;
mod locale;
pub mod phone;
mod selection;
mod state;
pub mod validation;

pub use catalog::{FormOptions, SelectOption};
pub use consent::{reconcile, ConsentField, ConsentState};
pub use draft::FormDraft;
pub use locale::{
    FormTranslations, InputText, InputTranslations, Locale, MessageTranslations,
    SubmitTranslations,
};
pub use phone::is_phone_valid;
pub use selection::{SelectionError, SelectionIndicator, SelectionSet, LABEL_SEPARATOR};
pub use state::{FormField, FormState, TextField, DEFAULT_COUNTRY_CODE};
pub use validation::FieldErrors;

use serde::{Deserialize, Serialize};

/// The two checkbox dropdowns that project into comma-joined fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectField {
    ResidenceType,
    HowDidYouHearAboutUs,
}

impl SelectField {
    pub const fn key(self) -> &'static str {
        match self {
            SelectField::ResidenceType => "residenceType",
            SelectField::HowDidYouHearAboutUs => "howDidYouHearAboutUs",
        }
    }
}

/// Ids whose dropdown indicator was cleared by a reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetReport {
    pub residence_types: Vec<String>,
    pub referral_sources: Vec<String>,
}

/// A live contact form: the single owner of [`FormState`] and the selection
/// sets feeding its derived fields. Every mutation leaves the state consistent.
#[derive(Debug, Clone)]
pub struct ContactForm {
    locale: Locale,
    state: FormState,
    residence_types: SelectionSet,
    referral_sources: SelectionSet,
}

impl ContactForm {
    pub fn new(locale: Locale) -> Self {
        Self::with_options(locale, FormOptions::for_locale(locale))
    }

    pub fn with_options(locale: Locale, options: FormOptions) -> Self {
        Self {
            locale,
            state: FormState::default(),
            residence_types: SelectionSet::new(
                SelectField::ResidenceType.key(),
                options.residence_types,
            ),
            referral_sources: SelectionSet::new(
                SelectField::HowDidYouHearAboutUs.key(),
                options.referral_sources,
            ),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn selection(&self, field: SelectField) -> &SelectionSet {
        match field {
            SelectField::ResidenceType => &self.residence_types,
            SelectField::HowDidYouHearAboutUs => &self.referral_sources,
        }
    }

    /// Store typed input, stripping characters the field does not accept.
    pub fn set_text(&mut self, field: TextField, raw: &str) {
        let value = match field {
            TextField::Name | TextField::Surname => validation::sanitize_name_input(raw),
            TextField::Phone => phone::sanitize_phone_input(raw),
            TextField::CountryCode | TextField::Email | TextField::Message => raw.to_string(),
        };
        *self.state.text_mut(field) = value;
    }

    pub fn set_consent(&mut self, field: ConsentField, checked: bool) {
        let next = self.state.consents().with(field, checked);
        self.state.store_consents(next);
    }

    /// Replace all consent flags at once, reconciled against the current ones.
    pub fn apply_consents(&mut self, proposed: ConsentState) {
        let next = reconcile(&self.state.consents(), proposed);
        self.state.store_consents(next);
    }

    pub fn toggle(
        &mut self,
        field: SelectField,
        option_id: &str,
        checked: bool,
    ) -> Result<(), SelectionError> {
        match field {
            SelectField::ResidenceType => {
                self.residence_types.toggle(option_id, checked)?;
                self.state.residence_type = self.residence_types.joined();
            }
            SelectField::HowDidYouHearAboutUs => {
                self.referral_sources.toggle(option_id, checked)?;
                self.state.how_did_you_hear_about_us = self.referral_sources.joined();
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        validation::validate(&self.state, &self.locale.translations())
    }

    /// Back to defaults, including dropdown indicators.
    pub fn reset(&mut self) -> ResetReport {
        self.state = FormState::default();
        ResetReport {
            residence_types: self.residence_types.reset(),
            referral_sources: self.referral_sources.reset(),
        }
    }
}
