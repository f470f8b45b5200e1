/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the supported LLM providers:
 * - OpenAI: chat completions API
 * - Anthropic: messages API
 * - Ollama: local LLM server
 */

use async_trait::async_trait;
use log::error;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all LLM providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Extract the generated text from the provider response
    fn extract_text(response: &Self::Response) -> String;

    /// Prompt and completion token counts, when the provider reports them
    fn token_usage(response: &Self::Response) -> (Option<u64>, Option<u64>);
}

/// Map a non-success HTTP status to a provider error
pub fn classify_status(status_code: u16, message: String) -> ProviderError {
    match status_code {
        401 | 403 => ProviderError::AuthenticationError(message),
        429 => ProviderError::RateLimitExceeded(message),
        _ => ProviderError::ApiError { status_code, message },
    }
}

/// Send a prepared request and decode a JSON body, classifying failures
pub(crate) async fn send_json<T: DeserializeOwned>(
    provider_name: &str,
    request: reqwest::RequestBuilder,
) -> Result<T, ProviderError> {
    let response = request.send().await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await
            .unwrap_or_else(|_| "Failed to get error response text".to_string());
        error!("{} API error ({}): {}", provider_name, status, error_text);
        return Err(classify_status(status.as_u16(), error_text));
    }

    let body = response.text().await?;
    serde_json::from_str::<T>(&body).map_err(|e| {
        ProviderError::ParseError(format!("{} response: {}", provider_name, e))
    })
}

pub mod anthropic;
pub mod ollama;
pub mod openai;
