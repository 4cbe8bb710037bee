/*!
 * Request handlers for the web layer.
 */

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use log::{error, info, warn};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use crate::web::types::{AppState, ErrorResponse, HealthResponse, QueryRequest, QueryResponse};

/// Landing page, read from the configured static directory
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    let page_path = Path::new(&state.static_dir).join("index.html");

    match tokio::fs::read_to_string(&page_path).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            warn!("Failed to read landing page {}: {}", page_path.display(), e);
            (StatusCode::NOT_FOUND, "index.html not found").into_response()
        }
    }
}

/// Health probe; always ok, no dependency checks
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_string() })
}

/// Answer one translation query.
///
/// POST /api/query
pub async fn query(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request_id = Uuid::new_v4();
    info!(
        "[{}] Query received ({} chars, translate_back={})",
        request_id,
        request.text.chars().count(),
        request.translate_back
    );

    let outcome = state.service
        .answer_query(&request.text, request.translate_back)
        .await
        .map_err(|e| {
            error!("[{}] Query failed: {}", request_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: e.to_string() }),
            )
        })?;

    info!(
        "[{}] Query answered in {} ms (detected '{}')",
        request_id, outcome.elapsed_ms, outcome.detected_lang
    );

    Ok(Json(QueryResponse::from(outcome)))
}
