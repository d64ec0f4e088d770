//! Domain entities.

use super::value_object::{DisplayName, MessageContent, MessageId, Timestamp, UserId};

/// A connected user. The id is fixed for the lifetime of the connection,
/// the name changes on `set-name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: DisplayName,
}

impl User {
    pub fn new(id: UserId, name: DisplayName) -> Self {
        Self { id, name }
    }
}

/// An immutable chat message as stored in the history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: UserId,
    pub content: MessageContent,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(
        id: MessageId,
        sender: UserId,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            sender,
            content,
            timestamp,
        }
    }
}
