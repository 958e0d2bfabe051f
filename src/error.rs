use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fallback text for the error panel when a failure carries no message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    /// Non-success HTTP status. `message` is the server's `detail` when it
    /// sent one, otherwise a synthesized status line.
    #[error("{message}")]
    Request { status: u16, message: String },

    #[error("{0}")]
    MalformedResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Highlight error: {0}")]
    Highlight(String),

    #[error("Invalid state transition: {current} -> {requested}")]
    InvalidTransition { current: String, requested: String },
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn request(status: u16, msg: impl Into<String>) -> Self {
        Self::Request {
            status,
            message: msg.into(),
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn highlight(msg: impl Into<String>) -> Self {
        Self::Highlight(msg.into())
    }

    /// Text shown to the user in the error panel.
    pub fn user_message(&self) -> String {
        let message = match self {
            Self::Network(e) => e.to_string(),
            other => other.to_string(),
        };

        if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}
