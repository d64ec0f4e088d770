//! Reconnection with exponential backoff.
//!
//! [`ReconnectSupervisor`] is a plain state machine that decides *whether*
//! and *when* to try again. [`ReconnectTimer`] is the scheduled task that
//! waits for that moment and can be cancelled once a connection opens.

use std::{pin::Pin, time::Duration};

use tokio::time::Sleep;

const BASE_DELAY_MS: u64 = 1_000;
const MAX_DELAY_MS: u64 = 30_000;
/// "Reconnecting" is announced only for attempts below this number
const RECONNECTING_NOTICE_LIMIT: u32 = 5;

/// Delay before attempt `attempt`: `min(2^attempt * 1000ms, 30000ms)`
pub fn backoff_delay(attempt: u32) -> Duration {
    let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
    Duration::from_millis(BASE_DELAY_MS.saturating_mul(factor).min(MAX_DELAY_MS))
}

/// User-facing connectivity notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionNotice {
    Connected,
    Reconnected,
    Disconnected,
    Reconnecting { attempt: u32 },
    ConnectionError,
}

/// What to do after a connection closed or failed to open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseOutcome {
    pub notices: Vec<ConnectionNotice>,
    /// `None` when the attempt cap has been reached
    pub retry_after: Option<Duration>,
}

#[derive(Debug, Clone, Default)]
pub struct ReconnectSupervisor {
    /// Consecutive failed or lost connections since the last open
    attempt: u32,
    max_attempts: Option<u32>,
    connected: bool,
    pending: bool,
    has_connected: bool,
}

impl ReconnectSupervisor {
    pub fn new(max_attempts: Option<u32>) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Mark a connection attempt as started.
    ///
    /// Returns `false`, and changes nothing, while a connection is open or
    /// another attempt is still pending.
    pub fn try_begin_attempt(&mut self) -> bool {
        if self.connected || self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Notice to show when a retry begins
    pub fn attempt_notice(&self) -> Option<ConnectionNotice> {
        (self.attempt > 0 && self.attempt < RECONNECTING_NOTICE_LIMIT).then_some(
            ConnectionNotice::Reconnecting {
                attempt: self.attempt,
            },
        )
    }

    pub fn on_open(&mut self) -> ConnectionNotice {
        let notice = if self.has_connected {
            ConnectionNotice::Reconnected
        } else {
            ConnectionNotice::Connected
        };
        self.pending = false;
        self.connected = true;
        self.has_connected = true;
        self.attempt = 0;
        notice
    }

    /// Record that the transport closed, or that a pending attempt failed
    pub fn on_close(&mut self) -> CloseOutcome {
        let mut notices = Vec::new();
        if self.connected {
            notices.push(ConnectionNotice::Disconnected);
        } else if !self.has_connected && self.attempt == 0 {
            notices.push(ConnectionNotice::ConnectionError);
        }

        self.connected = false;
        self.pending = false;
        self.attempt = self.attempt.saturating_add(1);

        let exhausted = self.max_attempts.is_some_and(|max| self.attempt >= max);
        CloseOutcome {
            notices,
            retry_after: (!exhausted).then(|| backoff_delay(self.attempt)),
        }
    }
}

/// A single cancellable scheduled wake-up
#[derive(Default)]
pub struct ReconnectTimer {
    sleep: Option<Pin<Box<Sleep>>>,
}

impl ReconnectTimer {
    /// Schedule the wake-up, replacing any earlier one
    pub fn schedule(&mut self, delay: Duration) {
        self.sleep = Some(Box::pin(tokio::time::sleep(delay)));
    }

    pub fn cancel(&mut self) {
        self.sleep = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.sleep.is_some()
    }

    /// Resolves when the scheduled delay has elapsed.
    ///
    /// Never resolves while nothing is scheduled, so it can sit in a
    /// `select!` next to other branches.
    pub async fn fired(&mut self) {
        match self.sleep.as_mut() {
            Some(sleep) => {
                sleep.as_mut().await;
                self.sleep = None;
            }
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_delays_for_first_five_attempts() {
        // テスト項目: 1〜5回目の待ち時間は 2s, 4s, 8s, 16s, 30s（上限）になる
        // given (前提条件):
        let attempts = 1..=5;

        // when (操作):
        let delays: Vec<u128> = attempts.map(|n| backoff_delay(n).as_millis()).collect();

        // then (期待する結果):
        assert_eq!(delays, vec![2000, 4000, 8000, 16000, 30000]);
    }

    #[test]
    fn test_backoff_delay_stays_capped_for_large_attempts() {
        // テスト項目: 試行回数が非常に大きくてもオーバーフローせず上限に留まる
        // given (前提条件):
        let attempt = u32::MAX;

        // when (操作):
        let delay = backoff_delay(attempt);

        // then (期待する結果):
        assert_eq!(delay, Duration::from_millis(30_000));
    }

    #[test]
    fn test_second_attempt_is_rejected_while_pending() {
        // テスト項目: 接続試行中は新たな接続試行を開始できない
        // given (前提条件):
        let mut supervisor = ReconnectSupervisor::new(None);
        assert!(supervisor.try_begin_attempt());

        // when (操作):
        let second = supervisor.try_begin_attempt();

        // then (期待する結果):
        assert!(!second);
        assert!(supervisor.is_pending());
    }

    #[test]
    fn test_attempt_is_rejected_while_connected() {
        // テスト項目: 接続中は新たな接続試行を開始できない
        // given (前提条件):
        let mut supervisor = ReconnectSupervisor::new(None);
        supervisor.try_begin_attempt();
        supervisor.on_open();

        // when (操作):
        let result = supervisor.try_begin_attempt();

        // then (期待する結果):
        assert!(!result);
        assert!(supervisor.is_connected());
    }

    #[test]
    fn test_first_open_is_connected_and_later_opens_are_reconnected() {
        // テスト項目: 初回の接続は Connected、2回目以降は Reconnected と通知される
        // given (前提条件):
        let mut supervisor = ReconnectSupervisor::new(None);
        supervisor.try_begin_attempt();

        // when (操作):
        let first = supervisor.on_open();
        supervisor.on_close();
        supervisor.try_begin_attempt();
        let second = supervisor.on_open();

        // then (期待する結果):
        assert_eq!(first, ConnectionNotice::Connected);
        assert_eq!(second, ConnectionNotice::Reconnected);
        assert_eq!(supervisor.attempt(), 0);
    }

    #[test]
    fn test_losing_live_connection_schedules_backoff() {
        // テスト項目: 接続中に切断されると Disconnected が通知され、2秒後の再接続が予定される
        // given (前提条件):
        let mut supervisor = ReconnectSupervisor::new(None);
        supervisor.try_begin_attempt();
        supervisor.on_open();

        // when (操作):
        let outcome = supervisor.on_close();

        // then (期待する結果):
        assert_eq!(outcome.notices, vec![ConnectionNotice::Disconnected]);
        assert_eq!(outcome.retry_after, Some(Duration::from_millis(2000)));
        assert!(!supervisor.is_connected());
        assert!(!supervisor.is_pending());
    }

    #[test]
    fn test_consecutive_failures_grow_delay_and_reset_on_open() {
        // テスト項目: 連続した失敗で待ち時間が伸び、接続成功でカウンタがリセットされる
        // given (前提条件):
        let mut supervisor = ReconnectSupervisor::new(None);
        supervisor.try_begin_attempt();
        supervisor.on_open();
        supervisor.on_close();

        // when (操作):
        let mut delays = Vec::new();
        for _ in 0..4 {
            supervisor.try_begin_attempt();
            delays.push(supervisor.on_close().retry_after);
        }
        supervisor.try_begin_attempt();
        supervisor.on_open();

        // then (期待する結果):
        assert_eq!(
            delays,
            vec![
                Some(Duration::from_millis(4000)),
                Some(Duration::from_millis(8000)),
                Some(Duration::from_millis(16000)),
                Some(Duration::from_millis(30000)),
            ]
        );
        assert_eq!(supervisor.attempt(), 0);
    }

    #[test]
    fn test_connection_error_is_reported_only_on_very_first_failure() {
        // テスト項目: ConnectionError は最初の接続失敗でのみ通知される
        // given (前提条件):
        let mut supervisor = ReconnectSupervisor::new(None);

        // when (操作):
        supervisor.try_begin_attempt();
        let first = supervisor.on_close();
        supervisor.try_begin_attempt();
        let second = supervisor.on_close();

        // then (期待する結果):
        assert_eq!(first.notices, vec![ConnectionNotice::ConnectionError]);
        assert!(second.notices.is_empty());
    }

    #[test]
    fn test_reconnecting_notice_only_below_fifth_attempt() {
        // テスト項目: Reconnecting は試行回数が5未満の間だけ通知される
        // given (前提条件):
        let mut supervisor = ReconnectSupervisor::new(None);
        let mut notices = Vec::new();

        // when (操作):
        for _ in 0..6 {
            supervisor.try_begin_attempt();
            supervisor.on_close();
            notices.push(supervisor.attempt_notice());
        }

        // then (期待する結果):
        assert_eq!(
            notices,
            vec![
                Some(ConnectionNotice::Reconnecting { attempt: 1 }),
                Some(ConnectionNotice::Reconnecting { attempt: 2 }),
                Some(ConnectionNotice::Reconnecting { attempt: 3 }),
                Some(ConnectionNotice::Reconnecting { attempt: 4 }),
                None,
                None,
            ]
        );
    }

    #[test]
    fn test_attempt_cap_stops_retrying() {
        // テスト項目: 試行回数の上限に達すると再接続は予定されない
        // given (前提条件):
        let mut supervisor = ReconnectSupervisor::new(Some(2));
        supervisor.try_begin_attempt();
        let first = supervisor.on_close();

        // when (操作):
        supervisor.try_begin_attempt();
        let second = supervisor.on_close();

        // then (期待する結果):
        assert_eq!(first.retry_after, Some(Duration::from_millis(2000)));
        assert_eq!(second.retry_after, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_after_scheduled_delay() {
        // テスト項目: タイマーは予定した時間が経過した時点で発火する
        // given (前提条件):
        let mut timer = ReconnectTimer::default();
        let start = tokio::time::Instant::now();
        timer.schedule(backoff_delay(1));

        // when (操作):
        timer.fired().await;

        // then (期待する結果):
        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert!(!timer.is_scheduled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_never_fires() {
        // テスト項目: キャンセルしたタイマーは発火しない
        // given (前提条件):
        let mut timer = ReconnectTimer::default();
        timer.schedule(Duration::from_millis(2000));

        // when (操作):
        timer.cancel();
        let result = tokio::time::timeout(Duration::from_secs(60), timer.fired()).await;

        // then (期待する結果):
        assert!(result.is_err());
        assert!(!timer.is_scheduled());
    }
}
