use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tower::ServiceExt;

use super::common::{draft, json_body, service, MemoryGateway, SlowGateway};
use crate::form::FormDraft;
use crate::submission::router::{
    form_schema_handler, submit_handler, validate_handler, LocaleQuery,
};
use crate::submission::{lead_router, GatewayError, IntakeError, SubmitRejected};

#[tokio::test]
async fn schema_handler_falls_back_to_default_locale() {
    let service = service(Arc::new(MemoryGateway::accepting("ok")));
    let response =
        form_schema_handler(State(service), Query(LocaleQuery::default())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["locale"], "tr");
    assert_eq!(body["options"]["residenceTypes"][0]["id"], "1+1");
    assert_eq!(body["translations"]["submit"]["default"], "GÖNDER");
}

#[tokio::test]
async fn schema_route_honours_locale_query() {
    let app = lead_router(service(Arc::new(MemoryGateway::accepting("ok"))));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/contact-form?locale=en")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["locale"], "en");
    assert_eq!(body["options"]["referralSources"][4]["label"], "Friend Referral");
}

#[tokio::test]
async fn validate_handler_reports_field_errors_without_submitting() {
    let gateway = Arc::new(MemoryGateway::accepting("ok"));
    let draft = FormDraft {
        email: "ayse@".to_string(),
        ..draft()
    };
    let response = validate_handler(State(service(gateway.clone())), Json(draft))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["valid"], false);
    assert_eq!(body["errors"]["email"], "Please enter a valid e-mail address");
    assert_eq!(body["state"]["residenceType"], "2+1");
    assert!(gateway.payloads().is_empty());
}

#[tokio::test]
async fn accepted_lead_returns_202() {
    let gateway = Arc::new(MemoryGateway::accepting("Thank you"));
    let response = submit_handler(State(service(gateway.clone())), Json(draft()))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Thank you");
    assert!(body["expiresAt"].is_string());

    let payloads = gateway.payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].get("language"), Some("en"));
    assert_eq!(payloads[0].get("howDidYouHearAboutUs"), Some("Google"));
    assert_eq!(payloads[0].get("utm_campaign"), Some("spring"));
}

#[tokio::test]
async fn invalid_lead_returns_422_with_errors() {
    let gateway = Arc::new(MemoryGateway::accepting("ok"));
    let draft = FormDraft {
        consent: false,
        phone: "123".to_string(),
        ..draft()
    };
    let response = submit_handler(State(service(gateway.clone())), Json(draft))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["errors"]["phone"].is_string());
    assert!(body["errors"]["consent"].is_string());
    assert!(gateway.payloads().is_empty());
}

#[tokio::test]
async fn unknown_option_returns_400() {
    let app = lead_router(service(Arc::new(MemoryGateway::accepting("ok"))));
    let body = json!({
        "name": "Ayşe",
        "residenceTypes": ["penthouse"],
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/leads")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["message"]
        .as_str()
        .is_some_and(|text| text.contains("penthouse")));
}

#[tokio::test]
async fn endpoint_failure_returns_502_with_server_text() {
    let gateway = Arc::new(MemoryGateway::answering(Err(GatewayError::Rejected {
        status: 500,
        message: Some("CRM maintenance".to_string()),
    })));
    let response = submit_handler(State(service(gateway)), Json(draft()))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "CRM maintenance");
}

#[tokio::test]
async fn repeat_post_of_an_in_flight_form_is_refused() {
    let gateway = Arc::new(SlowGateway::new(std::time::Duration::from_millis(100)));
    let service = service(gateway.clone());

    let (first, second) = tokio::join!(service.submit(draft()), service.submit(draft()));

    let first = first.expect("first post is delivered");
    assert_eq!(first.result.text, "Talebiniz alındı");
    assert!(matches!(
        second,
        Err(IntakeError::Rejected(SubmitRejected::InFlight))
    ));
    assert_eq!(gateway.payloads().len(), 1);
    assert_eq!(service.in_flight(), 0);

    service
        .submit(draft())
        .await
        .expect("form is free again once the endpoint answered");
    assert_eq!(gateway.payloads().len(), 2);
}

#[tokio::test]
async fn concurrent_duplicate_maps_to_409() {
    let gateway = Arc::new(SlowGateway::new(std::time::Duration::from_millis(100)));
    let service = service(gateway.clone());

    let (first, second) = tokio::join!(
        submit_handler(State(service.clone()), Json(draft())),
        submit_handler(State(service.clone()), Json(draft())),
    );

    assert_eq!(first.into_response().status(), StatusCode::ACCEPTED);
    let second = second.into_response();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = json_body(second).await;
    assert_eq!(body["success"], false);
    assert_eq!(gateway.payloads().len(), 1);
}

#[tokio::test]
async fn distinct_form_ids_submit_independently() {
    let gateway = Arc::new(SlowGateway::new(std::time::Duration::from_millis(50)));
    let service = service(gateway.clone());
    let tab = |id: &str| FormDraft {
        form_id: Some(id.to_string()),
        ..draft()
    };

    let (first, second) = tokio::join!(service.submit(tab("tab-1")), service.submit(tab("tab-2")));

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(gateway.payloads().len(), 2);
}

#[tokio::test]
async fn invalid_post_does_not_hold_the_form() {
    let service = service(Arc::new(MemoryGateway::accepting("ok")));
    let rejected = service
        .submit(FormDraft {
            consent: false,
            ..draft()
        })
        .await;
    assert!(matches!(
        rejected,
        Err(IntakeError::Rejected(SubmitRejected::Invalid(_)))
    ));
    assert_eq!(service.in_flight(), 0);
}

#[tokio::test]
async fn dropped_request_frees_its_form() {
    let gateway = Arc::new(SlowGateway::new(std::time::Duration::from_millis(200)));
    let service = service(gateway.clone());

    let timed_out =
        tokio::time::timeout(std::time::Duration::from_millis(10), service.submit(draft())).await;
    assert!(timed_out.is_err());
    assert_eq!(service.in_flight(), 0);

    let retry = tokio::time::timeout(std::time::Duration::from_secs(5), service.submit(draft()))
        .await
        .expect("retry finishes");
    assert!(retry.is_ok());
}
