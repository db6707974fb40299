use engine::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
    #[error("invalid base_url: {0}")]
    InvalidBaseUrl(String),
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ClientError {
    /// Maps a non-success status and the server's `detail` message.
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => ClientError::Unauthorized,
            403 => ClientError::Forbidden,
            404 => ClientError::NotFound(message),
            409 => ClientError::Conflict(message),
            400 | 422 => ClientError::Validation(message),
            _ => ClientError::Server { status, message },
        }
    }
}
