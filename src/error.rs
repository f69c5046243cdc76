//! Error types for the content outline pipeline.

use thiserror::Error;

/// Provider and configuration errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider authentication failed: {0}")]
    ProviderAuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    ProviderRateLimit(String),

    #[error("Provider model not found: {0}")]
    ProviderModelNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// A candidate brief that failed structural validation.
///
/// Every field-level problem is collected, so one violation report describes the
/// whole value rather than the first bad field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema violation: {}", .violations.join("; "))]
pub struct SchemaViolation {
    pub violations: Vec<String>,
}

impl SchemaViolation {
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            violations: vec![message.into()],
        }
    }
}

/// Errors raised by the content strategy stage.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// The keyword set has no usable primary keyword. Fatal to the run.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The inference service was unreachable, refused the request or timed out.
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error(transparent)]
    SchemaViolation(#[from] SchemaViolation),

    /// No decodable object could be recovered from free-form model output.
    #[error("Extraction failure: {0}")]
    ExtractionFailure(String),
}

impl From<ApiError> for StrategyError {
    fn from(err: ApiError) -> Self {
        StrategyError::TransportFailure(err.to_string())
    }
}
