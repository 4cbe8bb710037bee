/*!
 * Mock backend implementations for testing.
 *
 * This module provides mock backends that simulate different behaviors:
 * - `MockBackend::working()` - Pipelines build and translate successfully
 * - `MockBackend::failing()` - Every pipeline construction fails
 * - `MockBackend::flaky_build(n)` - The first n constructions fail
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::{TranslationBackend, TranslationPipeline};

/// Behavior mode for the mock backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Pipelines build and translate successfully
    Working,
    /// Every pipeline construction fails
    Failing,
    /// The first N constructions fail, later ones succeed
    FlakyBuild { fail_first: usize },
    /// Construction succeeds after a delay (for coalescing tests)
    SlowBuild { delay_ms: u64 },
    /// Pipelines build but every translation fails
    BrokenTranslation,
    /// Pipelines build and return empty translations
    Empty,
}

/// Mock backend for testing translation behavior
#[derive(Debug)]
pub struct MockBackend {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of pipeline constructions attempted
    build_count: Arc<AtomicUsize>,
    /// Number of translations run across all pipelines
    translate_count: Arc<AtomicUsize>,
    /// Custom translation generator (optional)
    custom_translation: Option<fn(&str, &str) -> String>,
}

impl MockBackend {
    /// Create a new mock backend with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            build_count: Arc::new(AtomicUsize::new(0)),
            translate_count: Arc::new(AtomicUsize::new(0)),
            custom_translation: None,
        }
    }

    /// Create a working mock backend that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock backend where every pipeline construction fails
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock backend whose first `fail_first` constructions fail
    pub fn flaky_build(fail_first: usize) -> Self {
        Self::new(MockBehavior::FlakyBuild { fail_first })
    }

    /// Create a mock backend whose constructions take `delay_ms` milliseconds
    pub fn slow_build(delay_ms: u64) -> Self {
        Self::new(MockBehavior::SlowBuild { delay_ms })
    }

    /// Create a mock backend whose pipelines fail every translation
    pub fn broken_translation() -> Self {
        Self::new(MockBehavior::BrokenTranslation)
    }

    /// Create a mock backend whose pipelines return empty translations
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom translation generator taking (model_id, text)
    pub fn with_custom_translation(mut self, generator: fn(&str, &str) -> String) -> Self {
        self.custom_translation = Some(generator);
        self
    }

    /// Number of pipeline constructions attempted so far
    pub fn build_count(&self) -> usize {
        self.build_count.load(Ordering::SeqCst)
    }

    /// Number of translations run so far across all pipelines
    pub fn translate_count(&self) -> usize {
        self.translate_count.load(Ordering::SeqCst)
    }
}

impl Clone for MockBackend {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            build_count: Arc::clone(&self.build_count),
            translate_count: Arc::clone(&self.translate_count),
            custom_translation: self.custom_translation,
        }
    }
}

/// Pipeline handed out by [`MockBackend`]
#[derive(Debug)]
pub struct MockPipeline {
    /// Model the pipeline pretends to run
    model_id: String,
    /// Behavior inherited from the backend
    behavior: MockBehavior,
    /// Translation counter shared with the backend
    translate_count: Arc<AtomicUsize>,
    /// Custom translation generator (optional)
    custom_translation: Option<fn(&str, &str) -> String>,
}

#[async_trait]
impl TranslationPipeline for MockPipeline {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        let count = self.translate_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::BrokenTranslation => Err(ProviderError::ApiError {
                status_code: 500,
                message: format!("Simulated translation failure (request #{})", count + 1),
            }),

            MockBehavior::Empty => Ok(String::new()),

            _ => {
                // Use the custom generator if set, otherwise tag the text
                // with the model so tests can assert which pipeline ran
                let translated = if let Some(generator) = self.custom_translation {
                    generator(&self.model_id, text)
                } else {
                    format!("[{}] {}", self.model_id, text)
                };
                Ok(translated)
            }
        }
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn load_pipeline(&self, model_id: &str)
        -> Result<Arc<dyn TranslationPipeline>, ProviderError> {
        if let MockBehavior::SlowBuild { delay_ms } = self.behavior {
            tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
        }

        let count = self.build_count.fetch_add(1, Ordering::SeqCst);

        let failed = match self.behavior {
            MockBehavior::Failing => true,
            MockBehavior::FlakyBuild { fail_first } => count < fail_first,
            _ => false,
        };
        if failed {
            return Err(ProviderError::ApiError {
                status_code: 500,
                message: format!("Simulated pipeline failure for '{}' (attempt #{})", model_id, count + 1),
            });
        }

        Ok(Arc::new(MockPipeline {
            model_id: model_id.to_string(),
            behavior: self.behavior,
            translate_count: Arc::clone(&self.translate_count),
            custom_translation: self.custom_translation,
        }))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string())),
            _ => Ok(()),
        }
    }
}
