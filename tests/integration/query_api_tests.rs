/*!
 * Integration tests for the HTTP query API
 */

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use polyreply::providers::mock::MockBackend;
use polyreply::responder;
use polyreply::web::{AppState, create_routes};

use crate::common;

/// Router wired to a mock backend and a detector stuck on `lang`
fn test_router(backend: MockBackend, lang: &str) -> Router {
    let service = common::service_with_fixed_detection(backend, lang);
    let state = Arc::new(AppState {
        service,
        static_dir: common::static_assets_dir(),
    });
    create_routes().with_state(state)
}

/// POST request with a JSON body for the query endpoint
fn query_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_shouldReturnOk() {
    let app = test_router(MockBackend::working(), "en");

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_query_withSupportedLanguage_shouldReturnFullResponse() {
    let app = test_router(MockBackend::working(), "es");

    let response = app
        .oneshot(query_request(json!({
            "text": "hola, tengo una pregunta",
            "translate_back": true
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    assert_eq!(body["original_text"], "hola, tengo una pregunta");
    assert_eq!(body["detected_lang"], "es");
    assert_eq!(
        body["translated_text"],
        "[Helsinki-NLP/opus-mt-es-en] hola, tengo una pregunta"
    );
    assert!(body["response_english"].is_string());
    assert!(body["response_translated"].is_string());
    assert!(body["timings_ms"]["total_ms"].is_u64());
}

#[tokio::test]
async fn test_query_withoutTranslateBack_shouldReturnNullTranslatedReply() {
    let app = test_router(MockBackend::working(), "fr");

    let response = app
        .oneshot(query_request(json!({ "text": "bonjour" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    // The field is present and null, not omitted
    let object = body.as_object().unwrap();
    assert!(object.contains_key("response_translated"));
    assert!(object["response_translated"].is_null());
}

#[tokio::test]
async fn test_query_withEnglishText_shouldEchoTextAsPivot() {
    let app = test_router(MockBackend::working(), "en");

    let response = app
        .oneshot(query_request(json!({
            "text": "I want a refund for my order",
            "translate_back": true
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    assert_eq!(body["translated_text"], "I want a refund for my order");
    assert_eq!(body["response_english"], responder::REFUND_REPLY);
    // Translate-back into English returns the reply unchanged
    assert_eq!(body["response_translated"], responder::REFUND_REPLY);
}

#[tokio::test]
async fn test_query_withEchoFallback_shouldQuoteOriginalMessage() {
    let app = test_router(MockBackend::working(), "en");

    let response = app
        .oneshot(query_request(json!({ "text": "Do you ship to Iceland?" })))
        .await
        .unwrap();

    let body = response_json(response).await;
    let reply = body["response_english"].as_str().unwrap();

    assert!(reply.contains("We received your message"));
    assert!(reply.contains("Do you ship to Iceland?"));
}

#[tokio::test]
async fn test_query_withMalformedBody_shouldReturnClientError() {
    let app = test_router(MockBackend::working(), "en");

    let request = Request::builder()
        .method("POST")
        .uri("/api/query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_query_withMissingTextField_shouldReturnUnprocessable() {
    let app = test_router(MockBackend::working(), "en");

    let response = app
        .oneshot(query_request(json!({ "translate_back": true })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_query_withFailingBackend_shouldReturnServerError() {
    let app = test_router(MockBackend::failing(), "es");

    let response = app
        .oneshot(query_request(json!({ "text": "hola", "translate_back": false })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Helsinki-NLP/opus-mt-es-en"));
}

#[tokio::test]
async fn test_unknownRoute_shouldReturnNotFound() {
    let app = test_router(MockBackend::working(), "en");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_index_shouldServeLandingPage() {
    let app = test_router(MockBackend::working(), "en");

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Polyreply"));
}

#[tokio::test]
async fn test_index_withMissingStaticDir_shouldReturnNotFound() {
    let service = common::service_with_fixed_detection(MockBackend::working(), "en");
    let state = Arc::new(AppState {
        service,
        static_dir: "does-not-exist".to_string(),
    });
    let app = create_routes().with_state(state);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
