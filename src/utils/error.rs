use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("HTTP request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Could not decode response from {url}: {source}")]
    DecodeError {
        url: String,
        source: serde_json::Error,
    },

    #[error("Payload serialization failed: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Collect location '{query}': {reason}")]
    LocationMatchError { query: String, reason: String },
}

pub type Result<T> = std::result::Result<T, WatchError>;
