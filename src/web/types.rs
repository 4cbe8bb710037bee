/*!
 * Data types for the web layer.
 *
 * The wire format mirrors what the service has always returned, so field
 * names like `response_english` stay as they are even though the pivot
 * language is configurable in name only.
 */

use serde::{Deserialize, Serialize};

use crate::translation::{QueryOutcome, TranslationService};

/// Application state shared by all handlers
pub struct AppState {
    /// Translation service answering the queries
    pub service: TranslationService,
    /// Directory the landing page is read from
    pub static_dir: String,
}

/// Query request
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Free-form text in any language
    pub text: String,
    /// Whether to translate the reply back into the detected language
    #[serde(default)]
    pub translate_back: bool,
}

/// Query response
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    /// The query exactly as received
    pub original_text: String,
    /// Detected ISO 639-1 code, or "und"
    pub detected_lang: String,
    /// The query translated into English
    pub translated_text: String,
    /// Canned reply in English
    pub response_english: String,
    /// Reply in the detected language; null unless translate_back was set
    pub response_translated: Option<String>,
    /// Request timing breakdown
    pub timings_ms: Timings,
}

/// Timing breakdown for one request
#[derive(Debug, Serialize)]
pub struct Timings {
    /// End-to-end time in whole milliseconds
    pub total_ms: u64,
}

/// Health probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Fixed "ok"
    pub status: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable description of what failed
    pub error: String,
}

impl From<QueryOutcome> for QueryResponse {
    fn from(outcome: QueryOutcome) -> Self {
        Self {
            original_text: outcome.original_text,
            detected_lang: outcome.detected_lang,
            translated_text: outcome.pivot_text,
            response_english: outcome.reply,
            response_translated: outcome.reply_translated,
            timings_ms: Timings { total_ms: outcome.elapsed_ms },
        }
    }
}
