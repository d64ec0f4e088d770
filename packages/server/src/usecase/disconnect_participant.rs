//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - レジストリからの削除と user-left の配信
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続中の参加者の切断
//! - エッジケース：既に削除済みの参加者（二重切断）

use std::sync::Arc;

use crate::domain::{ChatEvent, ChatRepository, MessagePusher, User, UserId};

use super::{dispatcher::Dispatcher, error::DisconnectError};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    dispatcher: Arc<Dispatcher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            dispatcher,
        }
    }

    /// 参加者切断を実行
    ///
    /// 送信チャンネルとレジストリから削除し、残りの全員に user-left を配信する。
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - 削除されたユーザー
    /// * `Ok(None)` - 既に削除済み（何も配信しない）
    pub async fn execute(&self, id: UserId) -> Result<Option<User>, DisconnectError> {
        let _turn = self.dispatcher.enter().await;

        self.message_pusher.unregister_client(&id).await;
        let Some(user) = self.repository.unregister_user(&id).await else {
            tracing::debug!("Participant '{}' was already removed", id);
            return Ok(None);
        };

        self.message_pusher
            .broadcast(&ChatEvent::UserLeft { id })
            .await
            .map_err(DisconnectError::BroadcastFailed)?;

        Ok(Some(user))
    }
}
