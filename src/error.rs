//! Error types for the StockNet client

use thiserror::Error;

/// Result type alias for StockNet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend answered `success: false`; carries its message
    #[error("{0}")]
    Rejected(String),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

const SESSION_EXPIRED: &str = "Session expired or invalid. Run `stocknet login` to sign in again.";

/// API-related errors
///
/// Business failures (`success: false`) are not errors; they come back as an
/// [`ApiResponse`](crate::client::models::ApiResponse) for the caller to show.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401, with the server's message when the response carried one
    #[error("{}", .0.as_deref().unwrap_or(SESSION_EXPIRED))]
    Unauthorized(Option<String>),

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Could not reach the StockNet server: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Failure to turn a bearer token into a user identity.
///
/// Never escapes the session layer: callers log it and treat the token as
/// carrying no identity.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Token must have three dot-separated segments, found {0}")]
    Malformed(usize),

    #[error("Token payload is not valid base64url: {0}")]
    Base64(String),

    #[error("Token payload is not a JSON object: {0}")]
    Json(String),
}

/// Navigation errors
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("No view is registered at '{0}'. Known routes: /, /login, /register, /profile")]
    NotFound(String),
}
