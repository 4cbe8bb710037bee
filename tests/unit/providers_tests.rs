/*!
 * Tests for the provider implementations
 */

use std::sync::Arc;

use polyreply::app_config::ProviderConfig;
use polyreply::providers::huggingface::HuggingFace;
use polyreply::providers::mock::MockBackend;
use polyreply::providers::{TranslationBackend, TranslationPipeline};

#[tokio::test]
async fn test_backend_asTraitObject_shouldLoadAndRunPipelines() {
    let backend: Arc<dyn TranslationBackend> = Arc::new(MockBackend::working());

    let pipeline = backend
        .load_pipeline("Helsinki-NLP/opus-mt-es-en")
        .await
        .unwrap();

    assert_eq!(pipeline.model_id(), "Helsinki-NLP/opus-mt-es-en");
    let translated = pipeline.translate("hola").await.unwrap();
    assert_eq!(translated, "[Helsinki-NLP/opus-mt-es-en] hola");
}

#[tokio::test]
async fn test_pipeline_asTraitObject_shouldBeShareable() {
    let backend = MockBackend::working();
    let pipeline: Arc<dyn TranslationPipeline> = backend
        .load_pipeline("Helsinki-NLP/opus-mt-fr-en")
        .await
        .unwrap();

    let shared = Arc::clone(&pipeline);
    let handle = tokio::spawn(async move { shared.translate("bonjour").await });

    assert!(handle.await.unwrap().is_ok());
}

#[test]
fn test_huggingface_fromConfig_shouldBuildClient() {
    let config = ProviderConfig {
        endpoint: "https://api-inference.huggingface.co".to_string(),
        api_key: "hf_test".to_string(),
        timeout_secs: 10,
        retry_count: 2,
        retry_backoff_ms: 500,
        wait_for_model: true,
    };

    // Construction must not panic or perform any network traffic
    let _backend = HuggingFace::from_config(&config);
}

#[test]
fn test_huggingface_testConnection_withUnroutableEndpoint_shouldFail() {
    let config = ProviderConfig {
        endpoint: "http://127.0.0.1:1".to_string(),
        api_key: String::new(),
        timeout_secs: 1,
        retry_count: 0,
        retry_backoff_ms: 1,
        wait_for_model: false,
    };
    let backend = HuggingFace::from_config(&config);

    let result = tokio_test::block_on(backend.test_connection());
    assert!(result.is_err());
}

/// Live test against the real inference API.
///
/// Run with `cargo test -- --ignored` and a valid HF_API_TOKEN, or
/// anonymously with rate limits.
#[tokio::test]
#[ignore]
async fn test_huggingface_infer_withRealApi_shouldTranslate() {
    let mut config = ProviderConfig::default();
    config.api_key = std::env::var("HF_API_TOKEN").unwrap_or_default();
    let backend = HuggingFace::from_config(&config);

    let pipeline = backend
        .load_pipeline("Helsinki-NLP/opus-mt-es-en")
        .await
        .unwrap();
    let translated = pipeline.translate("Hola, ¿cómo estás?").await.unwrap();

    println!("HF translation: {}", translated);
    assert!(!translated.is_empty());
}
