use thiserror::Error;

/// Failures reported by the provider clients.
///
/// The `Display` output is load-bearing: it is the string placed in an
/// envelope's `error` field when an operation fails.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure or non-2xx response from the provider.
    #[error("{0}")]
    Transport(String),

    /// Response body was not valid JSON.
    #[error("Invalid JSON response")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
