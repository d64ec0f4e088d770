//! 値オブジェクト
//!
//! 不変で、生成時にバリデーション済みであることを型で保証します。
//! 表示名と本文は前後の空白を除去した上で、空文字列を拒否します。

use std::fmt;

use super::error::ValueObjectError;

/// 接続ごとに割り当てられるユーザー ID（不透明な文字列）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyUserId);
        }
        Ok(Self(value))
    }

    /// Factory が生成した（空でないことが保証された）値から作成
    pub(crate) fn generated(value: String) -> Self {
        debug_assert!(!value.is_empty());
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// チャットメッセージ ID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyMessageId);
        }
        Ok(Self(value))
    }

    pub(crate) fn generated(value: String) -> Self {
        debug_assert!(!value.is_empty());
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 表示名（trim 済み、空でない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValueObjectError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyDisplayName);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// ID から `Guest-xxxx` 形式のデフォルト名を生成
    pub fn guest_for(id: &UserId) -> Self {
        let prefix: String = id.as_str().chars().take(4).collect();
        Self(format!("Guest-{}", prefix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// メッセージ本文（trim 済み、空でない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValueObjectError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyMessageContent);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
