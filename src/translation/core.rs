/*!
 * Core translation service.
 *
 * `TranslationService` owns the configured provider client and turns a
 * prompt into generated text, retrying transient provider failures with
 * exponential backoff. Everything above this layer talks to the
 * `TextGenerator` trait so batches can be driven without a network.
 */

use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::{ProviderError, TranslationError};
use crate::providers::Provider;
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::ollama::{GenerationRequest, Ollama};
use crate::providers::openai::{OpenAI, OpenAIRequest};

use super::prompts::PromptTemplate;

/// Upper bound on generated tokens for one batch
const MAX_COMPLETION_TOKENS: u32 = 4096;

/// Token usage statistics
#[derive(Debug, Clone)]
pub struct TokenUsageStats {
    /// Number of prompt tokens
    pub prompt_tokens: u64,

    /// Number of completion tokens
    pub completion_tokens: u64,

    /// Total number of tokens
    pub total_tokens: u64,

    /// Number of completed requests
    pub requests: u64,

    /// Start time of token tracking
    pub start_time: Instant,

    /// Total time spent on API requests
    pub api_duration: Duration,

    /// Provider name
    pub provider: String,

    /// Model name
    pub model: String,
}

impl Default for TokenUsageStats {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenUsageStats {
    /// Create a new empty token usage stats instance
    pub fn new() -> Self {
        Self::with_provider_info(String::new(), String::new())
    }

    /// Create new token usage stats with provider info
    pub fn with_provider_info(provider: String, model: String) -> Self {
        Self {
            prompt_tokens: 0,
            completion_tokens: 0,
            total_tokens: 0,
            requests: 0,
            start_time: Instant::now(),
            api_duration: Duration::from_secs(0),
            provider,
            model,
        }
    }

    /// Add token usage numbers
    pub fn add_token_usage(&mut self, prompt_tokens: Option<u64>, completion_tokens: Option<u64>) {
        if let Some(pt) = prompt_tokens {
            self.prompt_tokens += pt;
            self.total_tokens += pt;
        }

        if let Some(ct) = completion_tokens {
            self.completion_tokens += ct;
            self.total_tokens += ct;
        }
    }

    /// Account for one finished generation
    pub fn record(&mut self, generation: &Generation) {
        self.requests += 1;
        self.api_duration += generation.duration;
        self.add_token_usage(generation.prompt_tokens, generation.completion_tokens);
    }

    /// Calculate tokens per minute rate
    pub fn tokens_per_minute(&self) -> f64 {
        // API time when known, wall clock otherwise
        let duration_minutes = if self.api_duration.as_secs_f64() > 0.0 {
            self.api_duration.as_secs_f64() / 60.0
        } else {
            self.start_time.elapsed().as_secs_f64() / 60.0
        };

        if duration_minutes > 0.0 {
            self.total_tokens as f64 / duration_minutes
        } else {
            0.0
        }
    }

    /// Generate a summary of token usage
    pub fn summary(&self) -> String {
        let elapsed_minutes = self.start_time.elapsed().as_secs_f64() / 60.0;
        let api_minutes = self.api_duration.as_secs_f64() / 60.0;

        format!(
            "Token Usage Summary:\n\
             Provider: {}\n\
             Model: {}\n\
             Requests: {}\n\
             Prompt tokens: {}\n\
             Completion tokens: {}\n\
             Total tokens: {}\n\
             Elapsed time: {:.2} minutes\n\
             API request time: {:.2} minutes\n\
             Tokens per minute: {:.2}",
            self.provider,
            self.model,
            self.requests,
            self.prompt_tokens,
            self.completion_tokens,
            self.total_tokens,
            elapsed_minutes,
            api_minutes,
            self.tokens_per_minute()
        )
    }
}

/// Text produced by one model call
#[derive(Debug, Clone, Default)]
pub struct Generation {
    /// Raw generated text
    pub text: String,
    /// Prompt tokens, when reported
    pub prompt_tokens: Option<u64>,
    /// Completion tokens, when reported
    pub completion_tokens: Option<u64>,
    /// Time spent on the request, including retries
    pub duration: Duration,
}

impl Generation {
    /// Generation with text only
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Anything that turns a prompt into generated text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for the prompt
    async fn generate(&self, prompt: &str) -> Result<Generation, TranslationError>;

    /// Provider name for reporting
    fn provider_name(&self) -> String {
        "unknown".to_string()
    }

    /// Model name for reporting
    fn model_name(&self) -> String {
        String::new()
    }
}

/// Translation provider implementation variants
#[derive(Debug)]
enum TranslationProviderImpl {
    /// OpenAI API service
    OpenAI {
        /// Client instance
        client: OpenAI,
    },

    /// Anthropic API service
    Anthropic {
        /// Client instance
        client: Anthropic,
    },

    /// Ollama LLM service
    Ollama {
        /// Client instance
        client: Ollama,
    },
}

/// Translation service bound to one provider and language pair
#[derive(Debug)]
pub struct TranslationService {
    /// Provider client
    provider: TranslationProviderImpl,

    /// Translation configuration
    config: TranslationConfig,

    /// Rendered system prompt
    system_prompt: String,
}

impl TranslationService {
    /// Create a new translation service from configuration
    ///
    /// Language arguments are display names, e.g. "English" and "Chinese".
    pub fn new(config: TranslationConfig, source_language: &str, target_language: &str) -> Result<Self> {
        let endpoint = config.get_endpoint();
        let timeout_secs = config.get_timeout_secs();

        let provider = match config.provider {
            TranslationProvider::OpenAI => TranslationProviderImpl::OpenAI {
                client: OpenAI::new(config.get_api_key(), endpoint, timeout_secs),
            },
            TranslationProvider::Anthropic => TranslationProviderImpl::Anthropic {
                client: Anthropic::new(config.get_api_key(), endpoint, timeout_secs),
            },
            TranslationProvider::Ollama => TranslationProviderImpl::Ollama {
                client: Ollama::new(endpoint, timeout_secs),
            },
        };

        let system_prompt = PromptTemplate::new(&config.common.system_prompt)
            .render(source_language, target_language);

        Ok(Self {
            provider,
            config,
            system_prompt,
        })
    }

    /// The rendered system prompt sent with every request
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Run one request against the provider without retrying
    async fn generate_once(&self, prompt: &str) -> Result<Generation, ProviderError> {
        let model = self.config.get_model();
        let temperature = self.config.common.temperature;

        let (text, (prompt_tokens, completion_tokens)) = match &self.provider {
            TranslationProviderImpl::OpenAI { client } => {
                let request = OpenAIRequest::new(model)
                    .add_message("system", &self.system_prompt)
                    .add_message("user", prompt)
                    .temperature(temperature)
                    .max_tokens(MAX_COMPLETION_TOKENS);
                let response = client.complete(request).await?;
                (OpenAI::extract_text(&response), OpenAI::token_usage(&response))
            },
            TranslationProviderImpl::Anthropic { client } => {
                let request = AnthropicRequest::new(model, MAX_COMPLETION_TOKENS)
                    .system(&self.system_prompt)
                    .add_message("user", prompt)
                    .temperature(temperature);
                let response = client.complete(request).await?;
                (Anthropic::extract_text(&response), Anthropic::token_usage(&response))
            },
            TranslationProviderImpl::Ollama { client } => {
                let request = GenerationRequest::new(model, prompt)
                    .system(&self.system_prompt)
                    .temperature(temperature)
                    .num_predict(MAX_COMPLETION_TOKENS);
                let response = client.complete(request).await?;
                (Ollama::extract_text(&response), Ollama::token_usage(&response))
            },
        };

        Ok(Generation {
            text,
            prompt_tokens,
            completion_tokens,
            duration: Duration::from_secs(0),
        })
    }
}

/// Delay before the given retry attempt (1-based)
pub fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
    let factor = 1u64 << attempt.saturating_sub(1).min(16);
    Duration::from_millis(base_ms.saturating_mul(factor))
}

#[async_trait]
impl TextGenerator for TranslationService {
    async fn generate(&self, prompt: &str) -> Result<Generation, TranslationError> {
        let start_time = Instant::now();
        let max_retries = self.config.common.retry_count;
        let mut attempt = 0;

        loop {
            match self.generate_once(prompt).await {
                Ok(mut generation) => {
                    generation.duration = start_time.elapsed();
                    debug!(
                        "{} answered in {:?} after {} attempt(s)",
                        self.config.provider, generation.duration, attempt + 1
                    );
                    return Ok(generation);
                },
                Err(e) if e.is_retryable() && attempt < max_retries => {
                    attempt += 1;
                    let delay = backoff_delay(self.config.common.retry_backoff_ms, attempt);
                    warn!(
                        "{} request failed ({}), retry {}/{} in {:?}",
                        self.config.provider, e, attempt, max_retries, delay
                    );
                    tokio::time::sleep(delay).await;
                },
                Err(e) => return Err(TranslationError::Provider(e)),
            }
        }
    }

    fn provider_name(&self) -> String {
        self.config.provider.display_name().to_string()
    }

    fn model_name(&self) -> String {
        self.config.get_model()
    }
}
