/*!
 * Tests for the translation service against a local stub HTTP server
 */

use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use dualsub::app_config::{ProviderConfig, TranslationConfig, TranslationProvider};
use dualsub::errors::{ProviderError, TranslationError};
use dualsub::translation::{TextGenerator, TranslationService};

use crate::common::stub_server::spawn_stub_server;

fn openai_config(endpoint: String, retry_count: u32) -> TranslationConfig {
    let mut provider = ProviderConfig::new(TranslationProvider::OpenAI);
    provider.api_key = "sk-test".to_string();
    provider.endpoint = endpoint;
    provider.timeout_secs = 5;

    let mut config = TranslationConfig {
        provider: TranslationProvider::OpenAI,
        available_providers: vec![provider],
        ..Default::default()
    };
    config.common.retry_count = retry_count;
    config.common.retry_backoff_ms = 1;
    config
}

#[tokio::test]
async fn test_generate_withSuccessfulResponse_shouldReturnTextAndUsage() {
    let (addr, hits) = spawn_stub_server(
        "200 OK",
        r#"{"choices":[{"message":{"role":"assistant","content":"Hello|||你好"}}],"usage":{"prompt_tokens":12,"completion_tokens":3,"total_tokens":15}}"#,
    ).await;
    let service = TranslationService::new(openai_config(format!("http://{}/v1", addr), 3), "English", "Chinese").unwrap();

    let generation = service.generate("1. Hello").await.unwrap();

    assert_eq!(generation.text, "Hello|||你好");
    assert_eq!(generation.prompt_tokens, Some(12));
    assert_eq!(generation.completion_tokens, Some(3));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_generate_withServerErrors_shouldRetryThenFail() {
    let (addr, hits) = spawn_stub_server("503 Service Unavailable", r#"{"error":"overloaded"}"#).await;
    let service = TranslationService::new(openai_config(format!("http://{}/v1", addr), 2), "English", "Chinese").unwrap();

    let result = service.generate("1. Hello").await;

    assert!(matches!(
        result,
        Err(TranslationError::Provider(ProviderError::ApiError { status_code: 503, .. }))
    ));
    // First attempt plus two retries
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_generate_withAuthError_shouldNotRetry() {
    let (addr, hits) = spawn_stub_server("401 Unauthorized", r#"{"error":"invalid key"}"#).await;
    let service = TranslationService::new(openai_config(format!("http://{}/v1", addr), 3), "English", "Chinese").unwrap();

    let result = service.generate("1. Hello").await;

    assert!(matches!(result, Err(TranslationError::Provider(ProviderError::AuthenticationError(_)))));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_generate_withMalformedBody_shouldFailWithParseError() {
    let (addr, _) = spawn_stub_server("200 OK", "not json").await;
    let service = TranslationService::new(openai_config(format!("http://{}/v1", addr), 3), "English", "Chinese").unwrap();

    let result = service.generate("1. Hello").await;

    assert!(matches!(result, Err(TranslationError::Provider(ProviderError::ParseError(_)))));
}

#[tokio::test]
async fn test_generate_withOllamaGenerateEndpoint_shouldReadResponseField() {
    let (addr, _) = spawn_stub_server(
        "200 OK",
        r#"{"model":"llama3.2:3b","response":"Hi|||嗨","done":true,"prompt_eval_count":8,"eval_count":2}"#,
    ).await;
    let mut provider = ProviderConfig::new(TranslationProvider::Ollama);
    provider.endpoint = format!("http://{}", addr);
    let config = TranslationConfig {
        provider: TranslationProvider::Ollama,
        available_providers: vec![provider],
        ..Default::default()
    };
    let service = TranslationService::new(config, "English", "Chinese").unwrap();

    let generation = service.generate("1. Hi").await.unwrap();

    assert_eq!(generation.text, "Hi|||嗨");
    assert_eq!(generation.completion_tokens, Some(2));
    assert_eq!(service.model_name(), "llama3.2:3b");
}

#[tokio::test]
async fn test_generate_withInvalidEndpoint_shouldFailWithoutRetrying() {
    let mut config = openai_config("http://[::1".to_string(), 2);
    config.common.retry_backoff_ms = 300;
    let service = TranslationService::new(config, "English", "Chinese").unwrap();

    let started = Instant::now();
    let result = service.generate("1. Hello").await;

    assert!(matches!(result, Err(TranslationError::Provider(ProviderError::RequestFailed(_)))));
    assert!(started.elapsed() < Duration::from_millis(300));
}
