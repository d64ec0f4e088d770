//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ChatMessage, DisplayName, RepositoryError, User, UserId};

/// Chat Repository trait
///
/// 接続中ユーザー（レジストリ）とメッセージ履歴へのアクセスを提供する。
/// 各メソッドは単独でアトミックに実行される。複数の操作をまたぐ順序保証は
/// UseCase 層の `Dispatcher` が担う。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// 一意な ID とデフォルト名でユーザーを登録
    async fn register_user(&self) -> Result<User, RepositoryError>;

    /// 表示名を変更し、変更前の名前を返す
    async fn rename_user(
        &self,
        id: &UserId,
        new_name: DisplayName,
    ) -> Result<DisplayName, RepositoryError>;

    /// ユーザーを削除（存在しなかった場合は `None`）
    async fn unregister_user(&self, id: &UserId) -> Option<User>;

    /// 接続中のユーザー一覧（登録順）
    async fn list_users(&self) -> Vec<User>;

    /// ID でユーザーを取得
    async fn find_user(&self, id: &UserId) -> Result<User, RepositoryError>;

    /// メッセージを履歴に追加
    async fn append_message(&self, message: ChatMessage);

    /// 直近 `n` 件のメッセージ（追加順）
    async fn recent_messages(&self, n: usize) -> Vec<ChatMessage>;

    /// 接続中のユーザー数
    async fn count_users(&self) -> usize;
}
