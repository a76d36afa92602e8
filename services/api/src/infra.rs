use async_trait::async_trait;
use lead_form::config::AppConfig;
use lead_form::submission::{
    GatewayError, IntakeSettings, LeadGateway, LeadPayload, LeadReceipt,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Gateway that keeps leads in memory instead of posting them to the CRM.
#[derive(Default, Clone)]
pub(crate) struct DryRunGateway {
    delivered: Arc<Mutex<Vec<LeadPayload>>>,
    decline_with: Option<String>,
}

impl DryRunGateway {
    #[cfg(test)]
    pub(crate) fn declining(message: impl Into<String>) -> Self {
        Self {
            delivered: Arc::default(),
            decline_with: Some(message.into()),
        }
    }

    pub(crate) fn delivered(&self) -> Vec<LeadPayload> {
        self.delivered
            .lock()
            .expect("dry-run mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl LeadGateway for DryRunGateway {
    async fn submit(&self, payload: &LeadPayload) -> Result<LeadReceipt, GatewayError> {
        if let Some(message) = &self.decline_with {
            return Err(GatewayError::Declined {
                message: Some(message.clone()),
            });
        }

        let mut guard = self.delivered.lock().expect("dry-run mutex poisoned");
        guard.push(payload.clone());
        info!(fields = payload.fields().len(), "dry-run lead recorded");
        Ok(LeadReceipt { message: None })
    }
}

pub(crate) fn intake_settings(config: &AppConfig) -> IntakeSettings {
    IntakeSettings {
        default_locale: config.form.default_locale,
        message_ttl: config.form.message_ttl(),
    }
}
