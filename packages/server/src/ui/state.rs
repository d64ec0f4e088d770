//! Server state shared across connection handlers.

use std::sync::Arc;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, RenameParticipantUseCase,
    SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// RenameParticipantUseCase（表示名変更のユースケース）
    pub rename_participant_usecase: Arc<RenameParticipantUseCase>,
}
