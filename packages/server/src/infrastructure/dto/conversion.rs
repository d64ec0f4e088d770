//! Conversion logic between DTOs and domain entities.

use crate::domain::{ChatEvent, entity};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<entity::ChatMessage> for dto::ChatMessage {
    fn from(model: entity::ChatMessage) -> Self {
        Self {
            id: model.id.into_string(),
            sender: model.sender.into_string(),
            content: model.content.into_string(),
            timestamp: model.timestamp.value(),
        }
    }
}

impl From<entity::User> for dto::User {
    fn from(model: entity::User) -> Self {
        Self {
            id: model.id.into_string(),
            name: model.name.into_string(),
        }
    }
}

impl From<ChatEvent> for dto::ServerEvent {
    fn from(event: ChatEvent) -> Self {
        match event {
            ChatEvent::Init {
                messages,
                users,
                user_id,
            } => Self::Init(dto::InitPayload {
                messages: messages.into_iter().map(Into::into).collect(),
                users: users.into_iter().map(Into::into).collect(),
                user_id: user_id.into_string(),
            }),
            ChatEvent::NewMessage(message) => Self::NewMessage(message.into()),
            ChatEvent::UserJoined(user) => Self::UserJoined(user.into()),
            ChatEvent::UserRenamed {
                id,
                old_name,
                new_name,
            } => Self::UserRenamed(dto::UserRenamedPayload {
                id: id.into_string(),
                old_name: old_name.into_string(),
                new_name: new_name.into_string(),
            }),
            ChatEvent::UserLeft { id } => Self::UserLeft(dto::UserLeftPayload {
                id: id.into_string(),
            }),
        }
    }
}
