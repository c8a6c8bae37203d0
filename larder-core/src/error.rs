use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Not signed in")]
    Unauthenticated,

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Logout already in progress")]
    LogoutInProgress,

    #[error("Failed to read upload: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// HTTP status of an `Api` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
