//! チャットルーム集約
//!
//! サーバー全体で共有される可変状態（接続中ユーザーとメッセージ履歴）を
//! ひとつにまとめたものです。Repository がこの型を排他的に所有します。

use super::{
    entity::{ChatMessage, User},
    error::RegistryError,
    factory::IdFactory,
    message_log::{DEFAULT_HISTORY_CAPACITY, MessageLog},
    registry::ConnectionRegistry,
    value_object::{DisplayName, UserId},
};

#[derive(Debug, Clone)]
pub struct ChatRoom {
    pub registry: ConnectionRegistry,
    pub log: MessageLog,
}

impl Default for ChatRoom {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl ChatRoom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(history_capacity: usize) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            log: MessageLog::with_capacity(history_capacity),
        }
    }

    pub fn join(&mut self, ids: &dyn IdFactory) -> Result<User, RegistryError> {
        self.registry.register(ids)
    }

    pub fn rename(&mut self, id: &UserId, name: DisplayName) -> Result<DisplayName, RegistryError> {
        self.registry.rename(id, name)
    }

    pub fn leave(&mut self, id: &UserId) -> Option<User> {
        self.registry.unregister(id)
    }

    pub fn post(&mut self, message: ChatMessage) {
        self.log.append(message);
    }
}
