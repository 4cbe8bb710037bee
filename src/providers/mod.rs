/*!
 * Backend implementations for machine translation.
 *
 * This module contains the backend abstraction the translation service is
 * built against, plus the concrete implementations:
 * - HuggingFace: Hugging Face Inference API client
 * - Mock: configurable in-memory backend for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::errors::ProviderError;

/// A ready-to-use translation pipeline bound to one model.
///
/// Pipelines are produced by a [`TranslationBackend`] and shared behind
/// `Arc`, so implementations must tolerate concurrent calls.
#[async_trait]
pub trait TranslationPipeline: Send + Sync + Debug {
    /// Identifier of the model this pipeline runs
    fn model_id(&self) -> &str;

    /// Translate text through the model
    ///
    /// # Arguments
    /// * `text` - The text to translate
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(&self, text: &str) -> Result<String, ProviderError>;
}

/// Common trait for all translation backends
///
/// This trait defines the interface that all backend implementations must follow,
/// allowing them to be swapped without touching the service layer.
#[async_trait]
pub trait TranslationBackend: Send + Sync + Debug {
    /// Construct a pipeline for the given model
    ///
    /// Construction may be expensive; callers are expected to memoize the
    /// result. An error here means the pipeline must not be reused.
    ///
    /// # Arguments
    /// * `model_id` - Identifier of the model to load
    ///
    /// # Returns
    /// * `Result<Arc<dyn TranslationPipeline>, ProviderError>` - The pipeline or an error
    async fn load_pipeline(&self, model_id: &str)
        -> Result<Arc<dyn TranslationPipeline>, ProviderError>;

    /// Test the connection to the backend
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod huggingface;
pub mod mock;
