use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Advisory shown instead of a generation when no model is installed.
pub const NO_MODEL_ADVISORY: &str =
    "No models are installed on the server. Pull a model from the Model Management tab first.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("invalid JSON in response stream: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Server(String),

    #[error("{}", NO_MODEL_ADVISORY)]
    NoModelInstalled,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn server(msg: impl Into<String>) -> Self {
        Self::Server(msg.into())
    }

    /// Builds an HTTP error from a failed response body, preferring the
    /// server's `{"error": "..."}` field over the raw text.
    pub fn http(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());

        let message = if message.is_empty() {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("request failed")
                .to_string()
        } else {
            message
        };

        Self::Http { status, message }
    }

    /// True for failures of the exchange with the model server, as opposed to
    /// rejected input or local configuration problems.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Http { .. } | Self::Decode(_) | Self::Server(_)
        )
    }
}
