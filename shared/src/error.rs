use crate::drag::DropRejected;
use thiserror::Error;

/// Failure talking to the remote Files API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilesApiError {
    /// Non-success response; `message` comes from the `detail` body field when present
    #[error("{message} (HTTP {status})")]
    Http { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl FilesApiError {
    /// Message suitable for an inline error state or a notification
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Why a mutation was refused or failed. State is never touched on error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("invalid name '{0}'")]
    InvalidName(String),
    #[error("nothing selected")]
    NothingSelected,
    #[error("drop rejected: {0}")]
    DropRejected(#[from] DropRejected),
    #[error("no file tree loaded")]
    NoProjectTree,
    #[error(transparent)]
    Api(#[from] FilesApiError),
}

impl MutationError {
    /// True when the error was raised locally, before any request was sent
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::Api(_))
    }
}
