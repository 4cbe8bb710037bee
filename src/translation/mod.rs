/*!
 * Translation service for customer queries using per-language model pairs.
 *
 * This module contains the core functionality for routing queries through
 * the pivot language. It is split into several submodules:
 *
 * - `core`: Core translation functionality and service definition
 * - `registry`: Fixed table of supported languages and their model pairs
 * - `cache`: Memoization of constructed translation pipelines
 */

// Re-export main types for easier usage
pub use self::cache::PipelineCache;
pub use self::core::{QueryOutcome, TranslationService};
pub use self::registry::{ModelPair, ModelRegistry, PIVOT_LANG};

// Submodules
pub mod cache;
pub mod core;
pub mod registry;
