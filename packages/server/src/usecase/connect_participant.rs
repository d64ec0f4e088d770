//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 登録 → init 送信 → user-joined 配信の順序
//!
//! ### なぜこのテストが必要か
//! - 新規接続は init を他のどのイベントよりも先に受け取る必要がある
//! - init のスナップショットは直近 N 件・登録順のユーザー一覧でなければならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加者の接続
//! - 異常系：init の送信に失敗した場合の登録の取り消し

use std::sync::Arc;

use crate::domain::{ChatEvent, ChatRepository, MessagePusher, PusherChannel, User};

use super::{dispatcher::Dispatcher, error::ConnectError};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    dispatcher: Arc<Dispatcher>,
    /// init で送る直近メッセージの件数
    snapshot_size: usize,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        dispatcher: Arc<Dispatcher>,
        snapshot_size: usize,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            dispatcher,
            snapshot_size,
        }
    }

    /// 参加者接続を実行
    ///
    /// 1. レジストリに登録（ID とデフォルト名を割り当て）
    /// 2. 送信チャンネルを MessagePusher に登録
    /// 3. 本人に init（直近の履歴・ユーザー一覧・割り当てた ID）を送信
    /// 4. 全員に user-joined を配信
    ///
    /// # Arguments
    ///
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - 登録されたユーザー
    /// * `Err(ConnectError)` - 接続失敗（登録は取り消される）
    pub async fn execute(&self, sender: PusherChannel) -> Result<User, ConnectError> {
        let _turn = self.dispatcher.enter().await;

        let user = self.repository.register_user().await?;
        self.message_pusher
            .register_client(user.id.clone(), sender)
            .await;

        let init = ChatEvent::Init {
            messages: self.repository.recent_messages(self.snapshot_size).await,
            users: self.repository.list_users().await,
            user_id: user.id.clone(),
        };
        if let Err(e) = self.message_pusher.push_to(&user.id, &init).await {
            self.message_pusher.unregister_client(&user.id).await;
            self.repository.unregister_user(&user.id).await;
            return Err(ConnectError::SnapshotDelivery(e));
        }

        if let Err(e) = self
            .message_pusher
            .broadcast(&ChatEvent::UserJoined(user.clone()))
            .await
        {
            tracing::warn!("Failed to broadcast user-joined for '{}': {}", user.id, e);
        }

        Ok(user)
    }
}
