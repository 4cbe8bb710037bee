use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::ProviderConfig;
use crate::errors::ProviderError;
use crate::providers::{TranslationBackend, TranslationPipeline};

/// Probe input used when warming a model up
const WARMUP_TEXT: &str = "Hello";

/// Hugging Face Inference API client
#[derive(Debug, Clone)]
pub struct HuggingFace {
    /// Base URL of the inference API
    base_url: String,
    /// API token, empty for anonymous access
    api_key: String,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
    /// Whether to ask the API to block while the model loads
    wait_for_model: bool,
}

/// Inference request for the Hugging Face API
#[derive(Debug, Serialize)]
pub struct InferenceRequest {
    /// Text to run through the model
    inputs: String,
    /// Inference options
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<InferenceOptions>,
}

/// Inference options for the Hugging Face API
#[derive(Debug, Serialize)]
pub struct InferenceOptions {
    /// Block until the model is loaded instead of failing with 503
    #[serde(skip_serializing_if = "Option::is_none")]
    wait_for_model: Option<bool>,
    /// Reuse cached inference results when available
    #[serde(skip_serializing_if = "Option::is_none")]
    use_cache: Option<bool>,
}

/// One translation returned by the Hugging Face API
#[derive(Debug, Deserialize)]
pub struct TranslationOutput {
    /// Translated text
    pub translation_text: String,
}

/// Error payload returned by the Hugging Face API
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    /// Error message
    pub error: String,
    /// Seconds until the model is expected to be ready
    #[serde(default)]
    pub estimated_time: Option<f64>,
}

impl HuggingFace {
    /// Create a client for the given endpoint with default settings
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            base_url: endpoint.into(),
            api_key: String::new(),
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            max_retries: 3,
            backoff_base_ms: 1000,
            wait_for_model: true,
        }
    }

    /// Create a client from the provider section of the application config
    ///
    /// Uses connection pooling for better performance with concurrent requests.
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            base_url: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                // Keep connections alive for better performance
                .pool_idle_timeout(Duration::from_secs(90))
                .tcp_keepalive(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            max_retries: config.retry_count,
            backoff_base_ms: config.retry_backoff_ms,
            wait_for_model: config.wait_for_model,
        }
    }

    /// URL of the inference endpoint for one model repository
    fn model_url(&self, model_id: &str) -> String {
        format!("{}/models/{}", self.base_url.trim_end_matches('/'), model_id)
    }

    /// Run one text through a model with retry logic
    pub async fn infer(&self, model_id: &str, text: &str) -> Result<String, ProviderError> {
        let url = self.model_url(model_id);
        let request = InferenceRequest {
            inputs: text.to_string(),
            options: Some(InferenceOptions {
                wait_for_model: Some(self.wait_for_model),
                use_cache: Some(true),
            }),
        };

        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.max_retries {
            let mut builder = self.client.post(&url).json(&request);
            if !self.api_key.is_empty() {
                builder = builder.bearer_auth(&self.api_key);
            }

            match builder.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let outputs: Vec<TranslationOutput> = response.json().await
                            .map_err(|e| ProviderError::ParseError(
                                format!("Invalid inference response: {}", e)))?;
                        return outputs.into_iter().next()
                            .map(|output| output.translation_text)
                            .ok_or_else(|| ProviderError::ParseError(
                                "Inference response contained no translations".to_string()));
                    }

                    let message = Self::error_message(response).await;
                    match status.as_u16() {
                        404 => return Err(ProviderError::ModelNotFound(model_id.to_string())),
                        401 | 403 => return Err(ProviderError::AuthenticationError(message)),
                        429 => return Err(ProviderError::RateLimitExceeded(message)),
                        // 503 usually means the model is still loading; retry
                        code if status.is_server_error() => {
                            error!("Inference API error ({}): {} - attempt {}/{}",
                                  code, message, attempt + 1, self.max_retries + 1);
                            last_error = Some(ProviderError::ApiError { status_code: code, message });
                        }
                        // Other client errors are not retryable
                        code => {
                            error!("Inference API error ({}): {}", code, message);
                            return Err(ProviderError::ApiError { status_code: code, message });
                        }
                    }
                }
                Err(e) => {
                    // Network error - can retry
                    error!("Inference API network error: {} - attempt {}/{}",
                          e, attempt + 1, self.max_retries + 1);
                    last_error = Some(ProviderError::ConnectionError(e.to_string()));
                }
            }

            attempt += 1;

            // If we have more retries left, wait with exponential backoff
            if attempt <= self.max_retries {
                let backoff_ms = self.backoff_base_ms * (1u64 << (attempt - 1));
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
        }

        Err(last_error.unwrap_or_else(|| ProviderError::RequestFailed(
            format!("Inference request failed after {} attempts", self.max_retries + 1))))
    }

    /// Pull the error message out of a failed response, falling back to the raw body
    async fn error_message(response: reqwest::Response) -> String {
        let body = response.text().await
            .unwrap_or_else(|_| "Failed to get error response text".to_string());
        match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(parsed) => match parsed.estimated_time {
                Some(eta) => format!("{} (estimated time {:.0}s)", parsed.error, eta),
                None => parsed.error,
            },
            Err(_) => body,
        }
    }
}

/// Pipeline bound to one model repository on the inference API
#[derive(Debug)]
pub struct HuggingFacePipeline {
    /// Client shared with the backend that built this pipeline
    backend: HuggingFace,
    /// Model repository identifier
    model_id: String,
}

#[async_trait]
impl TranslationPipeline for HuggingFacePipeline {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        self.backend.infer(&self.model_id, text).await
    }
}

#[async_trait]
impl TranslationBackend for HuggingFace {
    async fn load_pipeline(&self, model_id: &str)
        -> Result<Arc<dyn TranslationPipeline>, ProviderError> {
        // Probe with a short input: surfaces bad model ids immediately and
        // lets the API start loading the model before real traffic arrives
        self.infer(model_id, WARMUP_TEXT).await?;
        info!("Pipeline ready for model '{}'", model_id);

        Ok(Arc::new(HuggingFacePipeline {
            backend: self.clone(),
            model_id: model_id.to_string(),
        }))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let response = self.client.get(&self.base_url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(
                format!("Failed to reach inference API: {}", e)))?;

        // Any HTTP response means the endpoint is reachable; auth and model
        // problems surface per request
        debug!("Inference API reachable ({})", response.status());
        Ok(())
    }
}
