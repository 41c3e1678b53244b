/// Error types shared by the backend client and the panel
use thiserror::Error;

/// Errors returned by calls to the user backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The backend answered with an envelope whose code is not 200
    #[error("{message}")]
    Application {
        /// Application-level code from the envelope
        code: i64,
        /// Message taken from the envelope
        message: String,
    },

    /// The request failed before a structured response was received
    #[error("{0}")]
    Transport(String),

    /// The body could not be decoded as the expected envelope
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_transport(&self) -> bool {
        !matches!(self, ApiError::Application { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return ApiError::Decode(e.to_string());
        }
        match e.status().and_then(|s| s.canonical_reason()) {
            Some(reason) => ApiError::Transport(reason.to_string()),
            None => ApiError::Transport(e.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
