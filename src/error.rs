use thiserror::Error;

/// Errors that can occur when talking to the HubSpot API
#[derive(Debug, Error)]
pub enum HubspotError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HubSpot API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unauthorized: invalid API key or access token")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Standard result type for the crate
pub type Result<T> = std::result::Result<T, HubspotError>;
