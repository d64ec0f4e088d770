//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの上限付き `Sender` を管理
//! - `ChatEvent` を JSON エンベロープに一度だけエンコードし、送信チャンネルに積む
//! - キューが満杯になった（受信が止まった）クライアントを切り離す
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `Sender` を受け取り、メッセージ送信に使用します。
//! 実際のソケットへの書き込みは接続ごとの送信タスクが行うため、遅いピアが
//! 他のクライアントへの配信を止めることはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::{
    domain::{ChatEvent, MessagePushError, MessagePusher, PusherChannel, UserId},
    infrastructure::dto::{codec::encode_event, websocket::ServerEvent},
};

/// WebSocket を使った MessagePusher 実装
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_client(user_id.clone(), tx).await;
/// pusher.broadcast(&ChatEvent::UserLeft { id: user_id }).await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// Key: user id, Value: 送信タスクへのチャンネル
    clients: Mutex<HashMap<UserId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    fn encode(event: &ChatEvent) -> Result<String, MessagePushError> {
        let envelope: ServerEvent = event.clone().into();
        encode_event(&envelope).map_err(|e| MessagePushError::EncodeFailed(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, client_id: UserId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Client '{}' registered to MessagePusher", client_id);
        clients.insert(client_id, sender);
    }

    async fn unregister_client(&self, client_id: &UserId) {
        let mut clients = self.clients.lock().await;
        clients.remove(client_id);
        tracing::debug!("Client '{}' unregistered from MessagePusher", client_id);
    }

    async fn push_to(&self, client_id: &UserId, event: &ChatEvent) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(client_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(client_id.as_str().to_string()))?;
        sender
            .try_send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed '{}' to client '{}'", event.kind(), client_id);
        Ok(())
    }

    async fn broadcast(&self, event: &ChatEvent) -> Result<usize, MessagePushError> {
        let content = Self::encode(event)?;
        let mut clients = self.clients.lock().await;

        let mut delivered = 0;
        let mut overflowed = Vec::new();
        for (client_id, sender) in clients.iter() {
            match sender.try_send(content.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        "Outbound queue of '{}' is full, dropping the client",
                        client_id
                    );
                    overflowed.push(client_id.clone());
                }
                // 送信タスクが終了済みのクライアントはスキップ（切断処理で削除される）
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!(
                        "Skipped '{}' for closed client '{}'",
                        event.kind(),
                        client_id
                    );
                }
            }
        }
        // Sender を破棄するとキューが閉じ、送信タスクが終了して切断処理に進む
        for client_id in &overflowed {
            clients.remove(client_id);
        }
        tracing::debug!(
            "Broadcasted '{}' to {}/{} clients",
            event.kind(),
            delivered,
            clients.len() + overflowed.len()
        );

        Ok(delivered)
    }
}
