use serde::{Deserialize, Serialize};

/// Site languages. Turkish is served without a path prefix and is the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Tr,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Tr, Locale::En];

    /// Accepts bare tags and region-qualified ones such as `en-GB` or `tr_TR`.
    pub fn parse(tag: &str) -> Option<Self> {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "tr" => Some(Self::Tr),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    pub fn parse_or(tag: Option<&str>, fallback: Locale) -> Self {
        tag.and_then(Self::parse).unwrap_or(fallback)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Locale::Tr => "tr",
            Locale::En => "en",
        }
    }

    pub fn translations(self) -> FormTranslations {
        match self {
            Locale::Tr => FormTranslations::turkish(),
            Locale::En => FormTranslations::english(),
        }
    }
}

/// Placeholder and validation message for a single input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputText {
    pub placeholder: String,
    pub error: String,
}

impl InputText {
    fn new(placeholder: &str, error: &str) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            error: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputTranslations {
    pub name: InputText,
    pub surname: InputText,
    pub country_code: InputText,
    pub phone: InputText,
    pub email: InputText,
    pub residence_type: InputText,
    pub how_did_you_hear_about_us: InputText,
    pub message: InputText,
    pub consent: InputText,
    pub consent_electronic_message: InputText,
    pub consent_sms: InputText,
    pub consent_email: InputText,
    pub consent_phone: InputText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitTranslations {
    pub default: String,
    pub sending: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageTranslations {
    pub success: String,
    pub error: String,
}

/// Every user-facing string the contact form needs for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormTranslations {
    pub inputs: InputTranslations,
    pub submit: SubmitTranslations,
    pub messages: MessageTranslations,
}

impl FormTranslations {
    pub fn turkish() -> Self {
        Self {
            inputs: InputTranslations {
                name: InputText::new("AD*", "Lütfen adınızı giriniz"),
                surname: InputText::new("SOYAD*", "Lütfen soyadınızı giriniz"),
                country_code: InputText::new("ÜLKE KODU", "Lütfen ülke kodu seçiniz"),
                phone: InputText::new("TELEFON*", "Lütfen geçerli bir telefon numarası giriniz"),
                email: InputText::new("E-POSTA*", "Lütfen geçerli bir e-posta adresi giriniz"),
                residence_type: InputText::new("KONUT TİPİ*", "Lütfen konut tipi seçiniz"),
                how_did_you_hear_about_us: InputText::new(
                    "BİZİ NEREDEN DUYDUNUZ?*",
                    "Lütfen bizi nereden duyduğunuzu seçiniz",
                ),
                message: InputText::new("MESAJINIZ", ""),
                consent: InputText::new(
                    "Kişisel verilerimin işlenmesine ilişkin aydınlatma metnini okudum, açık rıza veriyorum.",
                    "Devam etmek için onay vermeniz gerekmektedir",
                ),
                consent_electronic_message: InputText::new(
                    "Ticari elektronik ileti almayı kabul ediyorum.",
                    "",
                ),
                consent_sms: InputText::new("SMS", ""),
                consent_email: InputText::new("E-posta", ""),
                consent_phone: InputText::new("Telefon", ""),
            },
            submit: SubmitTranslations {
                default: "GÖNDER".to_string(),
                sending: "GÖNDERİLİYOR...".to_string(),
            },
            messages: MessageTranslations {
                success: "Formunuz başarıyla gönderildi.".to_string(),
                error: "Form gönderilemedi, lütfen tekrar deneyiniz.".to_string(),
            },
        }
    }

    pub fn english() -> Self {
        Self {
            inputs: InputTranslations {
                name: InputText::new("NAME*", "Please enter your name"),
                surname: InputText::new("SURNAME*", "Please enter your surname"),
                country_code: InputText::new("COUNTRY CODE", "Country code is required"),
                phone: InputText::new("PHONE*", "Please enter a valid phone number"),
                email: InputText::new("E-MAIL*", "Please enter a valid e-mail address"),
                residence_type: InputText::new(
                    "RESIDENCE TYPE*",
                    "Please select a residence type",
                ),
                how_did_you_hear_about_us: InputText::new(
                    "HOW DID YOU HEAR ABOUT US?*",
                    "Please tell us how you heard about us",
                ),
                message: InputText::new("YOUR MESSAGE", ""),
                consent: InputText::new(
                    "I have read the privacy notice and give explicit consent to the processing of my personal data.",
                    "You must give consent to continue",
                ),
                consent_electronic_message: InputText::new(
                    "I agree to receive commercial electronic messages.",
                    "",
                ),
                consent_sms: InputText::new("SMS", ""),
                consent_email: InputText::new("E-mail", ""),
                consent_phone: InputText::new("Phone call", ""),
            },
            submit: SubmitTranslations {
                default: "SUBMIT".to_string(),
                sending: "SENDING...".to_string(),
            },
            messages: MessageTranslations {
                success: "Your form has been submitted successfully.".to_string(),
                error: "Failed to submit form".to_string(),
            },
        }
    }
}
