//! UseCase: 表示名の変更

use std::sync::Arc;

use crate::domain::{
    ChatEvent, ChatRepository, DisplayName, MessagePusher, RepositoryError, UserId,
};

use super::{dispatcher::Dispatcher, error::RenameError};

/// 表示名変更のユースケース
pub struct RenameParticipantUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    dispatcher: Arc<Dispatcher>,
}

impl RenameParticipantUseCase {
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

    /// 表示名を変更し、全員に user-renamed を配信する
    ///
    /// # Returns
    ///
    /// * `Ok((old_name, new_name))` - 変更前後の名前
    /// * `Err(RenameError)` - 未登録のユーザー、リポジトリの失敗、または配信失敗
    pub async fn execute(
        &self,
        id: UserId,
        new_name: DisplayName,
    ) -> Result<(DisplayName, DisplayName), RenameError> {
        let _turn = self.dispatcher.enter().await;

        let old_name = self
            .repository
            .rename_user(&id, new_name.clone())
            .await
            .map_err(|e| match e {
                RepositoryError::UserNotFound(id) => RenameError::UnknownParticipant(id),
                other => RenameError::Repository(other),
            })?;

        self.message_pusher
            .broadcast(&ChatEvent::UserRenamed {
                id,
                old_name: old_name.clone(),
                new_name: new_name.clone(),
            })
            .await
            .map_err(RenameError::BroadcastFailed)?;

        Ok((old_name, new_name))
    }
}
