/*!
 * Web server for the translation query API.
 *
 * Exposes the query endpoint, a health probe and the static landing page
 * over axum, with permissive CORS so the bundled page can call the API
 * from wherever it happens to be served.
 */

pub mod handlers;
pub mod routes;
pub mod types;

pub use routes::create_routes;
pub use types::{AppState, ErrorResponse, HealthResponse, QueryRequest, QueryResponse, Timings};

use axum::Router;
use log::info;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::translation::TranslationService;

/// Web server hosting the query API
pub struct WebServer {
    /// Application configuration
    config: Config,
    /// State shared with the handlers
    state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server around a translation service
    pub fn new(config: Config, service: TranslationService) -> Self {
        let state = Arc::new(AppState {
            service,
            static_dir: config.static_dir.clone(),
        });

        Self { config, state }
    }

    /// Start the web server and block until it exits
    pub async fn start(&self) -> Result<(), AppError> {
        let app = create_router(Arc::clone(&self.state), &self.config);

        let listener = tokio::net::TcpListener::bind(
            format!("{}:{}", self.config.server.host, self.config.server.port)
        ).await?;

        info!(
            "Listening on http://{}:{}",
            self.config.server.host, self.config.server.port
        );

        axum::serve(listener, app).await?;
        Ok(())
    }
}

/// Assemble the full router with middleware and static assets
fn create_router(app_state: Arc<AppState>, config: &Config) -> Router {
    create_routes()
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .nest_service("/static", ServeDir::new(&config.static_dir))
}
