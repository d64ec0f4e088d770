//! Events delivered from the server to connected clients.

use super::{
    entity::{ChatMessage, User},
    value_object::{DisplayName, UserId},
};

/// An outbound event, independent of the wire representation.
///
/// [`MessagePusher`](super::MessagePusher) implementations encode it once per
/// delivery call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Join-time snapshot for a single connection
    Init {
        messages: Vec<ChatMessage>,
        users: Vec<User>,
        user_id: UserId,
    },
    NewMessage(ChatMessage),
    UserJoined(User),
    UserRenamed {
        id: UserId,
        old_name: DisplayName,
        new_name: DisplayName,
    },
    UserLeft {
        id: UserId,
    },
}

impl ChatEvent {
    /// Wire tag of this event, used for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Init { .. } => "init",
            Self::NewMessage(_) => "new-message",
            Self::UserJoined(_) => "user-joined",
            Self::UserRenamed { .. } => "user-renamed",
            Self::UserLeft { .. } => "user-left",
        }
    }
}
