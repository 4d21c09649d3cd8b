use schema_common::Violations;
use thiserror::Error;

/// Client error types
///
/// A provider response with HTTP status >= 400 is not represented here; it
/// resolves as a normal [`crate::ApiResponse`] so callers can branch on the
/// provider-reported payload.
#[derive(Debug, Error)]
pub enum MandrillError {
    /// Construction-time failure: missing API key, invalid configuration
    /// values, or an HTTP client that could not be built.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The message failed schema validation; carries the field-path
    /// violation mapping.
    #[error("Message validation failed: {0}")]
    Validation(Violations),

    /// Operation-level precondition failure (missing template name, blank
    /// name argument) that never reaches the validator.
    #[error("Invalid request: {0}")]
    Request(String),

    /// Network failure or timeout, propagated unmodified.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl MandrillError {
    /// The violation mapping, when this is a validation failure.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            MandrillError::Validation(violations) => Some(violations),
            _ => None,
        }
    }
}
