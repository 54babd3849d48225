use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppPicksError {
    #[error("Keychain error: {0}")]
    Keychain(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("Unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppPicksError {
    /// True for 401/403 responses, i.e. a missing or insufficient token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppPicksError::Status { status: 401 | 403, .. })
    }
}

impl From<AppPicksError> for String {
    fn from(err: AppPicksError) -> Self {
        err.to_string()
    }
}
