//! メッセージ送信（通知）のインターフェース
//!
//! ## 責務
//!
//! - 接続ごとの送信チャンネルの管理
//! - 単一クライアントへの送信（`push_to`）と全クライアントへの配信（`broadcast`）
//!
//! 送信はチャンネルへのキュー投入のみで、ピアの速度に関わらずブロックしない。
//! キューが満杯になったクライアントは切り離される。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ChatEvent, MessagePushError, UserId};

/// 接続ごとの送信キューの上限（フレーム数）
pub const OUTBOUND_QUEUE_CAPACITY: usize = 256;

/// クライアントの送信タスクへ繋がるチャンネル
pub type PusherChannel = mpsc::Sender<String>;

/// 上限付きの送信キューを作成
pub fn outbound_channel() -> (PusherChannel, mpsc::Receiver<String>) {
    mpsc::channel(OUTBOUND_QUEUE_CAPACITY)
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    async fn register_client(&self, client_id: UserId, sender: PusherChannel);

    /// クライアントの送信チャンネルを削除
    async fn unregister_client(&self, client_id: &UserId);

    /// 特定のクライアントにイベントを送信
    async fn push_to(&self, client_id: &UserId, event: &ChatEvent) -> Result<(), MessagePushError>;

    /// 登録済みの全クライアントにイベントを配信し、キューに積めた件数を返す
    ///
    /// 閉じたチャンネルへの送信はスキップされ、エラーにはならない。
    /// キューが満杯のクライアントは登録を解除され、その送信タスクは終了する。
    async fn broadcast(&self, event: &ChatEvent) -> Result<usize, MessagePushError>;
}
