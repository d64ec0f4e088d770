//! ID 生成
//!
//! ユーザー ID とメッセージ ID の生成を trait で抽象化し、
//! テストでは決定的な ID を注入できるようにします。

use uuid::Uuid;

use super::value_object::{MessageId, UserId};

/// ユーザー ID の長さ
const USER_ID_LEN: usize = 8;

/// ID を生成する Factory
pub trait IdFactory: Send + Sync {
    /// ユーザー ID の候補を生成（重複チェックは呼び出し側が行う）
    fn user_id(&self) -> UserId;

    /// メッセージ ID を生成
    fn message_id(&self) -> MessageId;
}

/// UUID v4 をもとにしたランダムな ID を生成する Factory
///
/// ユーザー ID は UUID の先頭8文字、メッセージ ID は UUID 全体（32文字）。
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdFactory;

impl IdFactory for RandomIdFactory {
    fn user_id(&self) -> UserId {
        let simple = Uuid::new_v4().simple().to_string();
        UserId::generated(simple[..USER_ID_LEN].to_string())
    }

    fn message_id(&self) -> MessageId {
        MessageId::generated(Uuid::new_v4().simple().to_string())
    }
}
