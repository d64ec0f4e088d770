//! Infrastructure 層
//!
//! - `dto`: WebSocket のワイヤーフォーマットとコーデック
//! - `repository`: `ChatRepository` の実装
//! - `message_pusher`: `MessagePusher` の実装

pub mod dto;
pub mod message_pusher;
pub mod repository;
