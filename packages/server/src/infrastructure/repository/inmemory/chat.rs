//! InMemory Chat Repository 実装
//!
//! ドメイン層が定義する ChatRepository trait の具体的な実装。
//! `ChatRoom` 集約を Mutex で保護し、プロセスメモリ上にのみ保持します
//! （再起動で失われます）。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, ChatRepository, ChatRoom, DisplayName, IdFactory, RepositoryError, User, UserId,
};

/// インメモリ Chat Repository 実装
pub struct InMemoryChatRepository {
    room: Mutex<ChatRoom>,
    ids: Arc<dyn IdFactory>,
}

impl InMemoryChatRepository {
    /// 新しい InMemoryChatRepository を作成
    ///
    /// # Arguments
    ///
    /// * `room` - 初期状態の ChatRoom（履歴の容量はここで決まる）
    /// * `ids` - ユーザー ID の生成に使う Factory
    pub fn new(room: ChatRoom, ids: Arc<dyn IdFactory>) -> Self {
        Self {
            room: Mutex::new(room),
            ids,
        }
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn register_user(&self) -> Result<User, RepositoryError> {
        let mut room = self.room.lock().await;
        Ok(room.join(self.ids.as_ref())?)
    }

    async fn rename_user(
        &self,
        id: &UserId,
        new_name: DisplayName,
    ) -> Result<DisplayName, RepositoryError> {
        let mut room = self.room.lock().await;
        Ok(room.rename(id, new_name)?)
    }

    async fn unregister_user(&self, id: &UserId) -> Option<User> {
        let mut room = self.room.lock().await;
        room.leave(id)
    }

    async fn list_users(&self) -> Vec<User> {
        let room = self.room.lock().await;
        room.registry.list()
    }

    async fn find_user(&self, id: &UserId) -> Result<User, RepositoryError> {
        let room = self.room.lock().await;
        Ok(room.registry.lookup(id)?)
    }

    async fn append_message(&self, message: ChatMessage) {
        let mut room = self.room.lock().await;
        room.post(message);
    }

    async fn recent_messages(&self, n: usize) -> Vec<ChatMessage> {
        let room = self.room.lock().await;
        room.log.snapshot(n)
    }

    async fn count_users(&self) -> usize {
        let room = self.room.lock().await;
        room.registry.len()
    }
}
