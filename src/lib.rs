/*!
 * # Polyreply - Multilingual auto-reply service
 *
 * A Rust service that answers customer queries in their own language.
 *
 * ## Features
 *
 * - Detect the language of free-form text locally (no network round trip)
 * - Translate queries into English through per-language Opus-MT model pairs
 * - Generate canned replies from a fixed keyword rule set
 * - Optionally translate the reply back into the detected language
 * - Memoize translation pipelines so each model is loaded at most once
 * - Report end-to-end latency with every response
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `detection`: Language detection behind an injectable trait
 * - `responder`: Keyword-rule reply generation
 * - `translation`: Pivot-language translation services:
 *   - `translation::core`: Core translation functionality
 *   - `translation::registry`: Supported languages and their model pairs
 *   - `translation::cache`: Memoization of constructed pipelines
 * - `providers`: Backend implementations for machine translation:
 *   - `providers::huggingface`: Hugging Face Inference API client
 *   - `providers::mock`: Configurable in-memory backend for tests
 * - `web`: axum server, routes and request handlers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod detection;
pub mod errors;
pub mod providers;
pub mod responder;
pub mod translation;
pub mod web;

// Re-export main types for easier usage
pub use app_config::Config;
pub use detection::{LanguageDetector, UNDETERMINED, WhatlangDetector};
pub use errors::{AppError, ProviderError, TranslationError};
pub use translation::{ModelRegistry, PIVOT_LANG, PipelineCache, QueryOutcome, TranslationService};
pub use web::WebServer;
