//! ドメイン層
//!
//! チャットリレーの中核となるモデルとインターフェースを定義します。
//!
//! - `value_object`: ID・表示名・本文などの値オブジェクト
//! - `entity`: `User` / `ChatMessage` エンティティ
//! - `registry`: 接続中ユーザーのレジストリ
//! - `message_log`: 容量制限付きのメッセージ履歴
//! - `room`: レジストリと履歴をまとめた集約
//! - `event`: クライアントへ配信されるイベント
//! - `lifecycle`: 接続ごとの状態遷移
//! - `repository` / `message_pusher`: Infrastructure 層が実装する trait

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod lifecycle;
pub mod message_log;
pub mod message_pusher;
pub mod registry;
pub mod repository;
pub mod room;
pub mod value_object;

pub use entity::{ChatMessage, User};
pub use error::{MessagePushError, RegistryError, RepositoryError, ValueObjectError};
pub use event::ChatEvent;
pub use factory::{IdFactory, RandomIdFactory};
pub use lifecycle::{ConnectionEvent, ConnectionState};
pub use message_log::{DEFAULT_HISTORY_CAPACITY, DEFAULT_SNAPSHOT_SIZE, MessageLog};
pub use message_pusher::{MessagePusher, OUTBOUND_QUEUE_CAPACITY, PusherChannel, outbound_channel};
pub use registry::ConnectionRegistry;
pub use repository::ChatRepository;
pub use room::ChatRoom;
pub use value_object::{DisplayName, MessageContent, MessageId, Timestamp, UserId};
