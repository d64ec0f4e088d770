//! UseCase errors.

use thiserror::Error;

use crate::domain::{MessagePushError, RepositoryError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("failed to register participant: {0}")]
    Registration(#[from] RepositoryError),

    #[error("failed to deliver the join snapshot: {0}")]
    SnapshotDelivery(MessagePushError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("sender '{0}' is not connected")]
    UnknownSender(String),

    #[error("failed to broadcast message: {0}")]
    BroadcastFailed(MessagePushError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenameError {
    #[error("participant '{0}' is not connected")]
    UnknownParticipant(String),

    #[error(transparent)]
    Repository(RepositoryError),

    #[error("failed to broadcast rename: {0}")]
    BroadcastFailed(MessagePushError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("failed to broadcast departure: {0}")]
    BroadcastFailed(MessagePushError),
}
