use serde::Serialize;

use super::locale::Locale;

/// A checkbox entry in one of the multi-select dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
        }
    }
}

/// Fixed option lists backing the residence type and referral source fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    pub residence_types: Vec<SelectOption>,
    pub referral_sources: Vec<SelectOption>,
}

impl FormOptions {
    pub fn for_locale(locale: Locale) -> Self {
        let residence_types = ["1+1", "2+1", "3+1", "4+1", "5+1"]
            .iter()
            .map(|layout| SelectOption::new(layout, layout))
            .collect();

        let referral_sources = match locale {
            Locale::Tr => vec![
                SelectOption::new("instagram", "Instagram"),
                SelectOption::new("facebook", "Facebook"),
                SelectOption::new("google", "Google"),
                SelectOption::new("billboard", "Açık Hava Reklamı"),
                SelectOption::new("friend", "Arkadaş Tavsiyesi"),
                SelectOption::new("other", "Diğer"),
            ],
            Locale::En => vec![
                SelectOption::new("instagram", "Instagram"),
                SelectOption::new("facebook", "Facebook"),
                SelectOption::new("google", "Google"),
                SelectOption::new("billboard", "Billboard"),
                SelectOption::new("friend", "Friend Referral"),
                SelectOption::new("other", "Other"),
            ],
        };

        Self {
            residence_types,
            referral_sources,
        }
    }
}
