/*!
 * Pipeline caching functionality.
 *
 * This module memoizes constructed translation pipelines so each model is
 * loaded at most once for the lifetime of the process. Construction is
 * expensive, so concurrent first requests for the same model are coalesced
 * into a single build; failed builds are never cached and the next caller
 * simply tries again.
 */

use log::debug;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;

use crate::errors::ProviderError;
use crate::providers::{TranslationBackend, TranslationPipeline};

/// Cache of ready pipelines keyed by model identifier
#[derive(Debug)]
pub struct PipelineCache {
    /// Constructed pipelines
    pipelines: Arc<RwLock<HashMap<String, Arc<dyn TranslationPipeline>>>>,

    /// Per-model construction locks; entries persist and the table stays
    /// bounded by the number of distinct model ids ever requested
    building: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,

    /// Cache hit counter
    hits: Arc<RwLock<usize>>,

    /// Cache miss counter
    misses: Arc<RwLock<usize>>,
}

impl PipelineCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            pipelines: Arc::new(RwLock::new(HashMap::new())),
            building: Arc::new(Mutex::new(HashMap::new())),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
        }
    }

    /// Get a pipeline from the cache
    pub fn get(&self, model_id: &str) -> Option<Arc<dyn TranslationPipeline>> {
        let pipelines = self.pipelines.read();

        match pipelines.get(model_id) {
            Some(pipeline) => {
                // Increment hit counter
                let mut hits = self.hits.write();
                *hits += 1;

                debug!("Pipeline cache hit for model '{}'", model_id);
                Some(Arc::clone(pipeline))
            }
            None => {
                // Increment miss counter
                let mut misses = self.misses.write();
                *misses += 1;

                debug!("Pipeline cache miss for model '{}'", model_id);
                None
            }
        }
    }

    /// Get the cached pipeline for a model, constructing it if needed.
    ///
    /// At most one construction runs per model id at a time; tasks that
    /// arrive during a build wait for it and reuse its result. An error
    /// from the backend propagates to every waiter that ends up building,
    /// and leaves the cache unchanged.
    pub async fn get_or_build(
        &self,
        model_id: &str,
        backend: &dyn TranslationBackend,
    ) -> Result<Arc<dyn TranslationPipeline>, ProviderError> {
        if let Some(pipeline) = self.get(model_id) {
            return Ok(pipeline);
        }

        let build_lock = {
            let mut building = self.building.lock();
            Arc::clone(building.entry(model_id.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(()))))
        };
        let _guard = build_lock.lock().await;

        // Another task may have finished the build while we waited
        if let Some(pipeline) = self.peek(model_id) {
            return Ok(pipeline);
        }

        let pipeline = backend.load_pipeline(model_id).await?;
        self.pipelines.write().insert(model_id.to_string(), Arc::clone(&pipeline));

        debug!("Cached pipeline for model '{}'", model_id);
        Ok(pipeline)
    }

    /// Store a pipeline in the cache under its own model id
    pub fn insert(&self, pipeline: Arc<dyn TranslationPipeline>) {
        let model_id = pipeline.model_id().to_string();
        self.pipelines.write().insert(model_id, pipeline);
    }

    /// Lookup without touching the hit/miss counters
    fn peek(&self, model_id: &str) -> Option<Arc<dyn TranslationPipeline>> {
        self.pipelines.read().get(model_id).map(Arc::clone)
    }

    /// Get cache statistics
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Clear the cache
    pub fn clear(&self) {
        self.pipelines.write().clear();

        let mut hits = self.hits.write();
        *hits = 0;

        let mut misses = self.misses.write();
        *misses = 0;

        debug!("Pipeline cache cleared");
    }

    /// Get the number of pipelines in the cache
    pub fn len(&self) -> usize {
        self.pipelines.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.pipelines.read().is_empty()
    }
}

impl Default for PipelineCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PipelineCache {
    fn clone(&self) -> Self {
        Self {
            pipelines: self.pipelines.clone(),
            building: self.building.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
        }
    }
}
