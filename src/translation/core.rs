/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct and its
 * implementation, which routes every query through the pivot language:
 * detect, translate in, reply, optionally translate back.
 */

use futures::future::join_all;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;

use crate::detection::{LanguageDetector, WhatlangDetector};
use crate::errors::{ProviderError, TranslationError};
use crate::providers::TranslationBackend;
use crate::responder;
use super::cache::PipelineCache;
use super::registry::ModelRegistry;

/// Everything produced while answering one query
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    /// The query exactly as received
    pub original_text: String,

    /// Detected ISO 639-1 code, or the undetermined sentinel
    pub detected_lang: String,

    /// The query in the pivot language
    pub pivot_text: String,

    /// Canned reply in the pivot language
    pub reply: String,

    /// Reply translated back into the detected language, when requested
    pub reply_translated: Option<String>,

    /// Wall-clock time spent answering, in whole milliseconds
    pub elapsed_ms: u64,
}

/// Translation service routing queries through per-language model pairs
#[derive(Debug)]
pub struct TranslationService {
    /// Backend that constructs model pipelines
    backend: Arc<dyn TranslationBackend>,

    /// Language detector for incoming text
    detector: Arc<dyn LanguageDetector>,

    /// Table of supported languages and their models
    registry: ModelRegistry,

    /// Memoized pipelines, one per model id
    pipelines: PipelineCache,
}

impl TranslationService {
    /// Create a service with the default detector, registry and an empty cache
    pub fn new(backend: Arc<dyn TranslationBackend>) -> Self {
        Self {
            backend,
            detector: Arc::new(WhatlangDetector::new()),
            registry: ModelRegistry::new(),
            pipelines: PipelineCache::new(),
        }
    }

    /// Create a service from explicit components.
    ///
    /// Tests use this to substitute a fixed detector or a pre-seeded cache;
    /// the cache shares its storage across clones, so callers can keep a
    /// handle to inspect it afterwards.
    pub fn with_components(
        backend: Arc<dyn TranslationBackend>,
        detector: Arc<dyn LanguageDetector>,
        registry: ModelRegistry,
        pipelines: PipelineCache,
    ) -> Self {
        Self { backend, detector, registry, pipelines }
    }

    /// Translate text from its source language into the pivot.
    ///
    /// Text already in the pivot, text with no established language and
    /// text in an unsupported language passes through unchanged without
    /// touching any pipeline.
    pub async fn translate_to_pivot(&self, text: &str, lang: &str)
        -> Result<String, TranslationError> {
        let Some(pair) = self.registry.lookup(lang) else {
            debug!("No model pair for '{}', passing text through", lang);
            return Ok(text.to_string());
        };

        self.run_pipeline(pair.to_pivot, text).await
    }

    /// Translate pivot-language text back into the target language.
    ///
    /// Same pass-through rule as [`Self::translate_to_pivot`], with the
    /// opposite model of the pair doing the work.
    pub async fn translate_from_pivot(&self, text: &str, lang: &str)
        -> Result<String, TranslationError> {
        let Some(pair) = self.registry.lookup(lang) else {
            debug!("No model pair for '{}', passing text through", lang);
            return Ok(text.to_string());
        };

        self.run_pipeline(pair.from_pivot, text).await
    }

    /// Answer one query end to end.
    ///
    /// Stages run strictly in order: detect the language, translate the
    /// query into the pivot, generate the reply, translate the reply back
    /// when asked to, and measure the whole thing. Detection cannot fail;
    /// translation failures abort the query.
    pub async fn answer_query(&self, text: &str, translate_back: bool)
        -> Result<QueryOutcome, TranslationError> {
        let started = Instant::now();

        let detected_lang = self.detector.detect_language(text);
        debug!("Query language detected as '{}'", detected_lang);

        let pivot_text = self.translate_to_pivot(text, &detected_lang).await?;
        let reply = responder::reply(&pivot_text);

        let reply_translated = if translate_back {
            Some(self.translate_from_pivot(&reply, &detected_lang).await?)
        } else {
            None
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;

        Ok(QueryOutcome {
            original_text: text.to_string(),
            detected_lang,
            pivot_text,
            reply,
            reply_translated,
            elapsed_ms,
        })
    }

    /// Build every registered pipeline up front.
    ///
    /// Builds run concurrently. Failures are logged and left for per-request
    /// retry; the return value is the number of pipelines that are ready.
    pub async fn preload(&self) -> usize {
        let model_ids = self.registry.model_ids();
        let total = model_ids.len();

        let builds = model_ids.into_iter().map(|model_id| {
            let pipelines = self.pipelines.clone();
            let backend = Arc::clone(&self.backend);
            async move {
                match pipelines.get_or_build(model_id, backend.as_ref()).await {
                    Ok(_) => true,
                    Err(e) => {
                        warn!("Preload failed for model '{}': {}", model_id, e);
                        false
                    }
                }
            }
        });

        let ready = join_all(builds).await.into_iter().filter(|ok| *ok).count();
        info!("Preloaded {}/{} translation pipelines", ready, total);
        ready
    }

    /// Test the connection to the translation backend
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        self.backend.test_connection().await
    }

    /// Languages the service can translate
    pub fn supported_languages(&self) -> Vec<&'static str> {
        self.registry.languages()
    }

    /// Fetch the pipeline for a model and run one text through it
    async fn run_pipeline(&self, model_id: &str, text: &str)
        -> Result<String, TranslationError> {
        let pipeline = self.pipelines
            .get_or_build(model_id, self.backend.as_ref())
            .await
            .map_err(|source| TranslationError::PipelineUnavailable {
                model_id: model_id.to_string(),
                source,
            })?;

        let translated = pipeline.translate(text).await?;
        Ok(translated)
    }
}
