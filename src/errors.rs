/*!
 * Error types for the dualsub application.
 *
 * Each layer has its own error type, using the thiserror crate for
 * ergonomic definitions:
 * - `ProviderError`: transport and API failures talking to an LLM provider
 * - `MetadataError`: failures talking to the film/series catalog
 * - `TranslationError`: fatal-per-file failures of the batch translator
 * - `AppError`: top-level wrapper
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Whether a retry of the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::ConnectionError(_) | Self::RateLimitExceeded(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500,
            Self::RequestFailed(_) | Self::ParseError(_) | Self::AuthenticationError(_) => false,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else if !error.is_builder() && (error.is_request() || error.is_body()) {
            // Dropped mid-transfer
            Self::ConnectionError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors from the film/series catalog lookup
///
/// These never abort a file: the resolver converts them into "not found".
#[derive(Error, Debug)]
pub enum MetadataError {
    /// Transport level failure (DNS, connect, timeout)
    #[error("Catalog request failed: {0}")]
    Transport(String),

    /// Catalog answered with a non-success status
    #[error("Catalog responded with status {status_code}: {message}")]
    Status {
        status_code: u16,
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Failed to parse catalog response: {0}")]
    Parse(String),

    /// Endpoint or query could not be turned into a URL
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for MetadataError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Parse(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API, after retries were exhausted
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A batch failed; processing of the file stops here
    #[error("Batch {batch} of {total} failed: {source}")]
    BatchFailed {
        batch: usize,
        total: usize,
        #[source]
        source: Box<TranslationError>,
    },
}

/// Per-file failure reported by the controller
#[derive(Error, Debug)]
pub enum AppError {
    /// Reading the input or writing the output failed
    #[error("File error: {0}")]
    File(String),

    /// Translation aborted
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),
}
