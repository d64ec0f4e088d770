//! 容量制限付きのメッセージ履歴
//!
//! 追加順がそのまま全クライアントが観測する正規の順序になります。
//! 容量を超えると先頭（最も古いもの）から破棄します。

use std::collections::VecDeque;

use super::entity::ChatMessage;

/// 履歴に保持するメッセージ数の上限
pub const DEFAULT_HISTORY_CAPACITY: usize = 500;

/// 新規接続時に送る直近メッセージの件数
pub const DEFAULT_SNAPSHOT_SIZE: usize = 50;

#[derive(Debug, Clone)]
pub struct MessageLog {
    entries: VecDeque<ChatMessage>,
    capacity: usize,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 容量を指定して作成（0 は 1 に切り上げる）
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// 末尾に追加し、容量を超えた分を先頭から破棄する
    pub fn append(&mut self, message: ChatMessage) {
        self.entries.push_back(message);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// 直近 `min(n, len)` 件を追加順で返す（独立したコピー）
    pub fn snapshot(&self, n: usize) -> Vec<ChatMessage> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageContent, MessageId, Timestamp, UserId};

    fn message(n: usize) -> ChatMessage {
        ChatMessage::new(
            MessageId::new(format!("msg-{}", n)).unwrap(),
            UserId::new("alice".to_string()).unwrap(),
            MessageContent::new(format!("message {}", n)).unwrap(),
            Timestamp::new(n as i64),
        )
    }

    fn ids(messages: &[ChatMessage]) -> Vec<String> {
        messages.iter().map(|m| m.id.as_str().to_string()).collect()
    }

    #[test]
    fn test_size_never_exceeds_capacity_and_keeps_most_recent() {
        // テスト項目: 追加のたびにサイズが上限以下で、直近のメッセージが追加順で残る
        // given (前提条件):
        let mut log = MessageLog::new();

        for n in 1..=1200 {
            // when (操作):
            log.append(message(n));

            // then (期待する結果):
            assert!(log.len() <= DEFAULT_HISTORY_CAPACITY);
            assert_eq!(log.len(), n.min(DEFAULT_HISTORY_CAPACITY));
        }
        let retained = log.snapshot(DEFAULT_HISTORY_CAPACITY);
        let expected: Vec<String> = (701..=1200).map(|n| format!("msg-{}", n)).collect();
        assert_eq!(ids(&retained), expected);
    }

    #[test]
    fn test_501st_append_evicts_first_message() {
        // テスト項目: 501件追加すると最初のメッセージが破棄され、サイズは500になる
        // given (前提条件):
        let mut log = MessageLog::new();

        // when (操作):
        for n in 1..=501 {
            log.append(message(n));
        }

        // then (期待する結果):
        assert_eq!(log.len(), 500);
        let all = log.snapshot(usize::MAX);
        assert!(!ids(&all).contains(&"msg-1".to_string()));
        assert_eq!(all.first().unwrap().id.as_str(), "msg-2");
        assert_eq!(all.last().unwrap().id.as_str(), "msg-501");
    }

    #[test]
    fn test_snapshot_returns_last_50_in_order() {
        // テスト項目: 50件以上追加後の snapshot(50) は直近50件を追加順で返す
        // given (前提条件):
        let mut log = MessageLog::new();
        for n in 1..=120 {
            log.append(message(n));
        }

        // when (操作):
        let snapshot = log.snapshot(DEFAULT_SNAPSHOT_SIZE);

        // then (期待する結果):
        let expected: Vec<String> = (71..=120).map(|n| format!("msg-{}", n)).collect();
        assert_eq!(ids(&snapshot), expected);
    }

    #[test]
    fn test_snapshot_with_fewer_than_window_returns_all() {
        // テスト項目: 50件未満の場合は全件が返される
        // given (前提条件):
        let mut log = MessageLog::new();
        for n in 1..=7 {
            log.append(message(n));
        }

        // when (操作):
        let snapshot = log.snapshot(DEFAULT_SNAPSHOT_SIZE);

        // then (期待する結果):
        let expected: Vec<String> = (1..=7).map(|n| format!("msg-{}", n)).collect();
        assert_eq!(ids(&snapshot), expected);
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_appends() {
        // テスト項目: 取得済みの snapshot は後続の追加の影響を受けない
        // given (前提条件):
        let mut log = MessageLog::with_capacity(2);
        log.append(message(1));
        log.append(message(2));
        let snapshot = log.snapshot(2);

        // when (操作):
        log.append(message(3));

        // then (期待する結果):
        assert_eq!(ids(&snapshot), vec!["msg-1", "msg-2"]);
        assert_eq!(ids(&log.snapshot(2)), vec!["msg-2", "msg-3"]);
    }

    #[test]
    fn test_empty_log_snapshot_is_empty() {
        // テスト項目: 空の履歴の snapshot は空
        // given (前提条件):
        let log = MessageLog::new();

        // when (操作):
        let snapshot = log.snapshot(DEFAULT_SNAPSHOT_SIZE);

        // then (期待する結果):
        assert!(snapshot.is_empty());
        assert!(log.is_empty());
    }
}
