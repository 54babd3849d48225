use thiserror::Error;

/// A failed read: week hydration, eligible apps, guideline status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct FetchError(pub String);

/// A failed write. The optimistic value it carried has already been rolled back
/// by the time this is surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to save {target}: {message}")]
pub struct MutationError {
    pub target: String,
    pub message: String,
}

impl MutationError {
    pub fn new(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            message: message.into(),
        }
    }
}
