use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use super::payload::LeadPayload;
use crate::config::LeadEndpointConfig;

/// Accepted lead, with whatever confirmation text the endpoint sent back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadReceipt {
    pub message: Option<String>,
}

/// Lead endpoint failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("lead endpoint answered with status {status}")]
    Rejected { status: u16, message: Option<String> },
    #[error("lead endpoint reported the submission as unsuccessful")]
    Declined { message: Option<String> },
    #[error("lead endpoint unreachable: {0}")]
    Transport(String),
    #[error("lead endpoint sent an unreadable response: {0}")]
    Decode(String),
    #[error("invalid lead endpoint URL '{0}'")]
    InvalidEndpoint(String),
}

impl GatewayError {
    /// Text supplied by the endpoint, preferred over generic copy.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Rejected { message, .. } | GatewayError::Declined { message } => {
                message.as_deref().filter(|text| !text.trim().is_empty())
            }
            _ => None,
        }
    }
}

/// Outbound hook for completed contact forms.
#[async_trait]
pub trait LeadGateway: Send + Sync {
    async fn submit(&self, payload: &LeadPayload) -> Result<LeadReceipt, GatewayError>;
}

#[derive(Debug, Deserialize)]
struct LeadResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Map a raw endpoint answer onto the success/failure contract: the status must
/// be 2xx and the body must say `success: true`.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<LeadReceipt, GatewayError> {
    let parsed = serde_json::from_slice::<LeadResponse>(body);

    if !(200..300).contains(&status) {
        return Err(GatewayError::Rejected {
            status,
            message: parsed.ok().and_then(|response| response.message),
        });
    }

    let response = parsed.map_err(|err| GatewayError::Decode(err.to_string()))?;
    if response.success {
        Ok(LeadReceipt {
            message: response.message,
        })
    } else {
        Err(GatewayError::Declined {
            message: response.message,
        })
    }
}

/// Posts form-encoded leads to the CRM intake script.
#[derive(Debug, Clone)]
pub struct HttpLeadGateway {
    client: Client,
    endpoint: Url,
}

impl HttpLeadGateway {
    pub fn new(config: &LeadEndpointConfig) -> Result<Self, GatewayError> {
        let endpoint = Url::parse(&config.url)
            .map_err(|_| GatewayError::InvalidEndpoint(config.url.clone()))?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl LeadGateway for HttpLeadGateway {
    async fn submit(&self, payload: &LeadPayload) -> Result<LeadReceipt, GatewayError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(payload.fields())
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, endpoint = %self.endpoint, "lead endpoint request failed");
                GatewayError::Transport(err.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        debug!(status, bytes = body.len(), "lead endpoint responded");

        interpret_response(status, &body)
    }
}
