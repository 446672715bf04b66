use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    /// Caller input is insufficient. Surfaced to the boundary as a client
    /// error and raised before any provider is contacted.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A single upstream adapter call failed. Captured at the coordinator,
    /// degrades that source's contribution to empty/unavailable and never
    /// surfaces as a whole-request failure.
    #[error("Provider failure: {0}")]
    ProviderFailure(String),

    /// Unexpected internal error during normalize/merge. Surfaced as a
    /// server error since it indicates a defect rather than an upstream
    /// condition.
    #[error("Aggregation failure: {0}")]
    AggregationFailure(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::ProviderFailure("Request timeout".to_string())
        } else if err.is_connect() {
            AppError::ProviderFailure("Failed to connect to upstream source".to_string())
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                404 => AppError::NotFound("Upstream resource not found".to_string()),
                _ => AppError::ProviderFailure(format!("HTTP {}: {}", status, err)),
            }
        } else {
            AppError::ProviderFailure(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::AggregationFailure(err.to_string())
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
