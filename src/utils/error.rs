use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileQueryError {
    #[error("Malformed registry response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("Unexpected registry schema: {message}")]
    UnexpectedSchema { message: String },

    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Transport failure: {message}")]
    TransportFailure { message: String },

    #[error("Invalid query input: {message}")]
    InvalidQuery { message: String },

    #[error("Authentication error: {message}")]
    Authentication { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ProfileQueryError>;
