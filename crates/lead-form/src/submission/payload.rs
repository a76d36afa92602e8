use reqwest::Url;
use serde::Serialize;

use crate::form::{FormState, Locale};

pub const UTM_KEYS: [&str; 3] = ["utm_source", "utm_medium", "utm_campaign"];

/// Page the form was submitted from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionContext {
    pub locale: Locale,
    pub page_url: String,
}

impl SubmissionContext {
    pub fn new(locale: Locale, page_url: impl Into<String>) -> Self {
        Self {
            locale,
            page_url: page_url.into(),
        }
    }

    /// Query parameter from the page URL, empty when missing or unparseable.
    pub fn query_parameter(&self, key: &str) -> String {
        Url::parse(&self.page_url)
            .ok()
            .and_then(|url| {
                url.query_pairs()
                    .find(|(name, _)| name == key)
                    .map(|(_, value)| value.into_owned())
            })
            .unwrap_or_default()
    }
}

/// Form-encoded body sent to the lead endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LeadPayload {
    fields: Vec<(String, String)>,
}

impl LeadPayload {
    pub fn build(state: &FormState, context: &SubmissionContext) -> Self {
        let mut fields: Vec<(String, String)> = state
            .to_pairs()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();

        fields.push(("language".to_string(), context.locale.as_str().to_string()));
        for key in UTM_KEYS {
            fields.push((key.to_string(), context.query_parameter(key)));
        }
        fields.push(("url".to_string(), context.page_url.clone()));

        Self { fields }
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}
