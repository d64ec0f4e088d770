//! 接続ごとの状態遷移
//!
//! ```text
//! Connecting --Established--> Open --TransportClosed--> Closed
//!      |                                                  ^
//!      +-------------------TransportClosed----------------+
//! ```
//!
//! `Closed` は終端状態で、以降のイベントはすべて無視されます。
//! フレームの受信は状態を変えません（デコード失敗でも `Open` のまま）。

/// 接続の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

/// 状態遷移を引き起こすイベント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// トランスポートが確立し、登録が完了した
    Established,
    /// クライアントからフレームを受信した
    FrameReceived,
    /// トランスポートが閉じられた（エラーを含む）
    TransportClosed,
}

impl ConnectionState {
    /// イベントを適用した次の状態
    pub fn next(self, event: ConnectionEvent) -> Self {
        match (self, event) {
            (Self::Closed, _) => Self::Closed,
            (_, ConnectionEvent::TransportClosed) => Self::Closed,
            (Self::Connecting, ConnectionEvent::Established) => Self::Open,
            (state, _) => state,
        }
    }

    /// 受信フレームを処理してよいか
    pub fn accepts_frames(self) -> bool {
        self == Self::Open
    }

    pub fn is_closed(self) -> bool {
        self == Self::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connecting_becomes_open_when_established() {
        // テスト項目: Connecting は Established で Open に遷移する
        // given (前提条件):
        let state = ConnectionState::Connecting;

        // when (操作):
        let next = state.next(ConnectionEvent::Established);

        // then (期待する結果):
        assert_eq!(next, ConnectionState::Open);
        assert!(next.accepts_frames());
    }

    #[test]
    fn test_frames_do_not_change_open_state() {
        // テスト項目: Open 中のフレーム受信では状態が変わらない
        // given (前提条件):
        let state = ConnectionState::Open;

        // when (操作):
        let next = state.next(ConnectionEvent::FrameReceived);

        // then (期待する結果):
        assert_eq!(next, ConnectionState::Open);
    }

    #[test]
    fn test_close_from_any_state_is_terminal() {
        // テスト項目: どの状態からでも TransportClosed で Closed になり、以後変化しない
        // given (前提条件):
        let states = [ConnectionState::Connecting, ConnectionState::Open];

        for state in states {
            // when (操作):
            let closed = state.next(ConnectionEvent::TransportClosed);

            // then (期待する結果):
            assert!(closed.is_closed());
            assert!(!closed.accepts_frames());
            assert_eq!(closed.next(ConnectionEvent::Established), ConnectionState::Closed);
            assert_eq!(closed.next(ConnectionEvent::FrameReceived), ConnectionState::Closed);
        }
    }

    #[test]
    fn test_connecting_does_not_accept_frames() {
        // テスト項目: 登録前（Connecting）はフレームを処理しない
        // given (前提条件):
        let state = ConnectionState::Connecting;

        // when (操作):
        let next = state.next(ConnectionEvent::FrameReceived);

        // then (期待する結果):
        assert_eq!(next, ConnectionState::Connecting);
        assert!(!next.accepts_frames());
    }
}
