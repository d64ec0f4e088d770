//! 接続中ユーザーのレジストリ
//!
//! 登録順を保持した `User` の集合です。ID の一意性はこの型が保証します。
//! 並行アクセスからの保護は所有者（[`ChatRoom`](super::ChatRoom) を保持する
//! Repository）の責務です。

use super::{
    entity::User,
    error::RegistryError,
    factory::IdFactory,
    value_object::{DisplayName, UserId},
};

/// ID 衝突時の再生成の上限
pub const MAX_ID_ATTEMPTS: usize = 32;

#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    users: Vec<User>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しいユーザーを登録
    ///
    /// 登録済みの ID と衝突しない ID が得られるまで Factory に再生成させ、
    /// ID から導出したデフォルト名（`Guest-xxxx`）を割り当てる。
    pub fn register(&mut self, ids: &dyn IdFactory) -> Result<User, RegistryError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = ids.user_id();
            if self.contains(&id) {
                tracing::debug!("Generated user id '{}' collides, retrying", id);
                continue;
            }
            let user = User::new(id.clone(), DisplayName::guest_for(&id));
            self.users.push(user.clone());
            return Ok(user);
        }
        Err(RegistryError::IdSpaceExhausted(MAX_ID_ATTEMPTS))
    }

    /// 表示名を変更し、変更前の名前を返す
    pub fn rename(
        &mut self,
        id: &UserId,
        new_name: DisplayName,
    ) -> Result<DisplayName, RegistryError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.as_str().to_string()))?;
        Ok(std::mem::replace(&mut user.name, new_name))
    }

    /// ユーザーを削除（存在しない場合は `None`）
    pub fn unregister(&mut self, id: &UserId) -> Option<User> {
        let index = self.users.iter().position(|u| &u.id == id)?;
        Some(self.users.remove(index))
    }

    /// 登録順のユーザー一覧（コピー）
    pub fn list(&self) -> Vec<User> {
        self.users.clone()
    }

    pub fn lookup(&self, id: &UserId) -> Result<User, RegistryError> {
        self.users
            .iter()
            .find(|u| &u.id == id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.as_str().to_string()))
    }

    pub fn contains(&self, id: &UserId) -> bool {
        self.users.iter().any(|u| &u.id == id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
