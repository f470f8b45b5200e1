/*!
 * Tests for error types and retry classification
 */

use std::error::Error;

use dualsub::errors::{AppError, MetadataError, ProviderError, TranslationError};

#[test]
fn test_isRetryable_withTransientErrors_shouldBeTrue() {
    assert!(ProviderError::Timeout("slow".to_string()).is_retryable());
    assert!(ProviderError::ConnectionError("refused".to_string()).is_retryable());
    assert!(ProviderError::RateLimitExceeded("429".to_string()).is_retryable());
    assert!(ProviderError::ApiError { status_code: 502, message: String::new() }.is_retryable());
}

#[test]
fn test_isRetryable_withPermanentErrors_shouldBeFalse() {
    assert!(!ProviderError::AuthenticationError("bad key".to_string()).is_retryable());
    assert!(!ProviderError::ParseError("garbage".to_string()).is_retryable());
    assert!(!ProviderError::RequestFailed("builder error: invalid IPv6 address".to_string()).is_retryable());
    assert!(!ProviderError::ApiError { status_code: 400, message: String::new() }.is_retryable());
}

#[test]
fn test_batchFailed_display_shouldNameBatchAndCause() {
    let error = TranslationError::BatchFailed {
        batch: 2,
        total: 3,
        source: Box::new(TranslationError::Provider(ProviderError::Timeout("60s".to_string()))),
    };

    let message = error.to_string();
    assert!(message.contains("Batch 2 of 3"));
    assert!(message.contains("Request timed out"));
    assert!(error.source().is_some());
}

#[test]
fn test_appError_fromTranslationError_shouldWrap() {
    let error: AppError = TranslationError::Provider(ProviderError::RateLimitExceeded("slow down".to_string())).into();
    assert!(matches!(error, AppError::Translation(_)));
    assert!(error.to_string().starts_with("Translation error"));
}

#[test]
fn test_metadataError_fromUrlParseError_shouldBeInvalidUrl() {
    let parse_error = url::Url::parse("not a url").unwrap_err();
    let error: MetadataError = parse_error.into();
    assert!(matches!(error, MetadataError::InvalidUrl(_)));
}
