use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::controller::ResultKind;
use super::gateway::LeadGateway;
use super::service::LeadIntakeService;
use crate::error::AppError;
use crate::form::{FormDraft, FormOptions, Locale};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LocaleQuery {
    locale: Option<String>,
}

/// Router builder exposing the contact form schema, validation and intake.
pub fn lead_router<G>(service: Arc<LeadIntakeService<G>>) -> Router
where
    G: LeadGateway + 'static,
{
    Router::new()
        .route("/api/v1/contact-form", get(form_schema_handler::<G>))
        .route(
            "/api/v1/contact-form/validate",
            post(validate_handler::<G>),
        )
        .route("/api/v1/leads", post(submit_handler::<G>))
        .with_state(service)
}

pub(crate) async fn form_schema_handler<G>(
    State(service): State<Arc<LeadIntakeService<G>>>,
    Query(query): Query<LocaleQuery>,
) -> Response
where
    G: LeadGateway + 'static,
{
    let locale = Locale::parse_or(query.locale.as_deref(), service.default_locale());
    let payload = json!({
        "locale": locale,
        "options": FormOptions::for_locale(locale),
        "translations": locale.translations(),
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn validate_handler<G>(
    State(service): State<Arc<LeadIntakeService<G>>>,
    Json(draft): Json<FormDraft>,
) -> Result<Response, AppError>
where
    G: LeadGateway + 'static,
{
    let preview = service.preview(draft)?;
    Ok((StatusCode::OK, Json(preview)).into_response())
}

pub(crate) async fn submit_handler<G>(
    State(service): State<Arc<LeadIntakeService<G>>>,
    Json(draft): Json<FormDraft>,
) -> Result<Response, AppError>
where
    G: LeadGateway + 'static,
{
    let outcome = service.submit(draft).await?;
    let status = match outcome.result.kind {
        ResultKind::Success => StatusCode::ACCEPTED,
        ResultKind::Error => StatusCode::BAD_GATEWAY,
    };
    let payload = json!({
        "success": outcome.result.kind == ResultKind::Success,
        "message": outcome.result.text,
        "expiresAt": outcome.result.expires_at,
    });
    Ok((status, Json(payload)).into_response())
}
