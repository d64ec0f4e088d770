//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージの生成（ID・送信者・時刻）、履歴への追加、全員への配信
//!
//! ### なぜこのテストが必要か
//! - 履歴への追加順が全クライアントの観測順と一致することを保証する
//! - 同時に送信されたメッセージでも、全クライアントが同じ順序で受け取ること
//!
//! ### どのような状況を想定しているか
//! - 正常系：送信者を含む全員への配信
//! - 異常系：未登録（切断済み）の送信者
//! - 並行：複数タスクからの同時送信

use std::sync::Arc;

use tsudoi_shared::time::Clock;

use crate::domain::{
    ChatEvent, ChatMessage, ChatRepository, IdFactory, MessageContent, MessagePusher, Timestamp,
    UserId,
};

use super::{dispatcher::Dispatcher, error::SendMessageError};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    dispatcher: Arc<Dispatcher>,
    ids: Arc<dyn IdFactory>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        dispatcher: Arc<Dispatcher>,
        ids: Arc<dyn IdFactory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            dispatcher,
            ids,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 送信者のユーザー ID
    /// * `content` - trim 済みの本文
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 履歴に追加され、配信されたメッセージ
    /// * `Err(SendMessageError)` - 送信失敗
    pub async fn execute(
        &self,
        sender: UserId,
        content: MessageContent,
    ) -> Result<ChatMessage, SendMessageError> {
        let _turn = self.dispatcher.enter().await;

        if self.repository.find_user(&sender).await.is_err() {
            return Err(SendMessageError::UnknownSender(sender.into_string()));
        }

        let message = ChatMessage::new(
            self.ids.message_id(),
            sender,
            content,
            Timestamp::new(self.clock.now_millis()),
        );
        self.repository.append_message(message.clone()).await;

        self.message_pusher
            .broadcast(&ChatEvent::NewMessage(message.clone()))
            .await
            .map_err(SendMessageError::BroadcastFailed)?;

        Ok(message)
    }
}
