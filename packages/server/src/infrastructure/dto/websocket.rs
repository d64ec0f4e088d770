//! WebSocket wire envelopes.
//!
//! Server → client envelopes are `{"type": ..., "data": ...}`.
//! Client → server envelopes carry their fields next to the tag:
//! `{"type": "message", "content": ...}` and `{"type": "set-name", "name": ...}`.

use serde::{Deserialize, Serialize};

/// Chat message as sent on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: String,
    pub content: String,
    /// Unix timestamp (milliseconds)
    pub timestamp: i64,
}

/// User as sent on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitPayload {
    pub messages: Vec<ChatMessage>,
    pub users: Vec<User>,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRenamedPayload {
    pub id: String,
    pub old_name: String,
    pub new_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLeftPayload {
    pub id: String,
}

/// Server → client envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    Init(InitPayload),
    NewMessage(ChatMessage),
    UserJoined(User),
    UserRenamed(UserRenamedPayload),
    UserLeft(UserLeftPayload),
}

/// Client → server envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientCommand {
    Message { content: String },
    SetName { name: String },
}

impl ClientCommand {
    /// Whether the text payload is empty after trimming
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Message { content } => content.trim().is_empty(),
            Self::SetName { name } => name.trim().is_empty(),
        }
    }
}
