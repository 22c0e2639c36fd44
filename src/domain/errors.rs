use thiserror::Error;

// Domain-level errors for session capture and retrieval.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session payload must be a JSON object")]
    InvalidPayload,
    #[error("session not found")]
    NotFound,
    #[error("stored session record is unreadable: {0}")]
    CorruptRecord(String),
    #[error("session storage failure: {0}")]
    IoFailure(#[from] std::io::Error),
}

// Errors raised while recording client diagnostics.
#[derive(Debug, Error)]
pub enum ClientLogError {
    #[error("invalid client log entry: {0}")]
    InvalidEntry(String),
    #[error("client log write failure: {0}")]
    IoFailure(#[from] std::io::Error),
}
