/*!
 * Route definitions for the web layer.
 */

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::web::handlers::{health, index, query};
use crate::web::types::AppState;

/// Build the application routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Landing page
        .route("/", get(index))
        // Health probe
        .route("/health", get(health))
        // Query endpoint
        .route("/api/query", post(query))
}
