//! Domain error types.

use thiserror::Error;

/// Errors raised when constructing value objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("user id must not be empty")]
    EmptyUserId,

    #[error("message id must not be empty")]
    EmptyMessageId,

    #[error("display name must not be empty")]
    EmptyDisplayName,

    #[error("message content must not be empty")]
    EmptyMessageContent,
}

/// Errors raised by [`ConnectionRegistry`](super::ConnectionRegistry)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No registered user has the given id
    #[error("user '{0}' is not registered")]
    NotFound(String),

    /// Every generated id collided with a registered one
    #[error("failed to generate a unique user id after {0} attempts")]
    IdSpaceExhausted(usize),
}

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("user '{0}' not found")]
    UserNotFound(String),

    #[error("could not allocate a user id: {0}")]
    IdAllocation(String),
}

impl From<RegistryError> for RepositoryError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => Self::UserNotFound(id),
            other @ RegistryError::IdSpaceExhausted(_) => Self::IdAllocation(other.to_string()),
        }
    }
}

/// Message push errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to encode event: {0}")]
    EncodeFailed(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
