use serde::{Deserialize, Serialize};

use super::consent::ConsentState;

pub const DEFAULT_COUNTRY_CODE: &str = "+90";

/// Every value the contact form holds. Field names serialize the way the lead
/// endpoint expects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub name: String,
    pub surname: String,
    pub country_code: String,
    pub phone: String,
    pub email: String,
    pub residence_type: String,
    pub how_did_you_hear_about_us: String,
    pub message: String,
    pub consent: bool,
    pub consent_electronic_message: bool,
    pub consent_sms: bool,
    pub consent_email: bool,
    pub consent_phone: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            surname: String::new(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            phone: String::new(),
            email: String::new(),
            residence_type: String::new(),
            how_did_you_hear_about_us: String::new(),
            message: String::new(),
            consent: false,
            consent_electronic_message: false,
            consent_sms: false,
            consent_email: false,
            consent_phone: false,
        }
    }
}

impl FormState {
    pub fn consents(&self) -> ConsentState {
        ConsentState {
            consent: self.consent,
            electronic_message: self.consent_electronic_message,
            sms: self.consent_sms,
            email: self.consent_email,
            phone: self.consent_phone,
        }
    }

    pub(crate) fn store_consents(&mut self, consents: ConsentState) {
        self.consent = consents.consent;
        self.consent_electronic_message = consents.electronic_message;
        self.consent_sms = consents.sms;
        self.consent_email = consents.email;
        self.consent_phone = consents.phone;
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.name,
            TextField::Surname => &self.surname,
            TextField::CountryCode => &self.country_code,
            TextField::Phone => &self.phone,
            TextField::Email => &self.email,
            TextField::Message => &self.message,
        }
    }

    pub(crate) fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Name => &mut self.name,
            TextField::Surname => &mut self.surname,
            TextField::CountryCode => &mut self.country_code,
            TextField::Phone => &mut self.phone,
            TextField::Email => &mut self.email,
            TextField::Message => &mut self.message,
        }
    }

    /// Wire representation: `(key, value)` pairs with booleans as `true`/`false`.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("surname", self.surname.clone()),
            ("countryCode", self.country_code.clone()),
            ("phone", self.phone.clone()),
            ("email", self.email.clone()),
            ("residenceType", self.residence_type.clone()),
            ("howDidYouHearAboutUs", self.how_did_you_hear_about_us.clone()),
            ("message", self.message.clone()),
            ("consent", self.consent.to_string()),
            (
                "consentElectronicMessage",
                self.consent_electronic_message.to_string(),
            ),
            ("consentSms", self.consent_sms.to_string()),
            ("consentEmail", self.consent_email.to_string()),
            ("consentPhone", self.consent_phone.to_string()),
        ]
    }
}

/// Free-text inputs a user can type into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextField {
    Name,
    Surname,
    CountryCode,
    Phone,
    Email,
    Message,
}

/// Fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Surname,
    CountryCode,
    Phone,
    Email,
    ResidenceType,
    HowDidYouHearAboutUs,
    Message,
    Consent,
}

impl FormField {
    pub const fn key(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Surname => "surname",
            FormField::CountryCode => "countryCode",
            FormField::Phone => "phone",
            FormField::Email => "email",
            FormField::ResidenceType => "residenceType",
            FormField::HowDidYouHearAboutUs => "howDidYouHearAboutUs",
            FormField::Message => "message",
            FormField::Consent => "consent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty_with_turkish_country_code() {
        let state = FormState::default();
        assert_eq!(state.country_code, "+90");
        assert!(state.name.is_empty() && state.residence_type.is_empty());
        assert_eq!(state.consents(), ConsentState::default());
    }

    #[test]
    fn pairs_stringify_every_field_in_wire_order() {
        let state = FormState {
            name: "Ayşe".to_string(),
            consent: true,
            ..FormState::default()
        };
        let pairs = state.to_pairs();
        assert_eq!(pairs.len(), 13);
        assert_eq!(pairs[0], ("name", "Ayşe".to_string()));
        assert!(pairs.contains(&("consent", "true".to_string())));
        assert!(pairs.contains(&("consentSms", "false".to_string())));
    }
}
