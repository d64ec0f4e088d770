//! 状態変更の直列化
//!
//! レジストリ・履歴の更新と配信を1つのクリティカルセクションとして扱うための
//! ゲートです。`tokio::sync::Mutex` は待機順（FIFO）で獲得されるため、
//! 先に開始された操作の配信が、後の操作の配信より先に各接続のキューへ積まれます。

use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct Dispatcher {
    turn: Mutex<()>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直列化区間に入る。ガードを drop すると次の操作が進む。
    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.turn.lock().await
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use tokio::sync::mpsc;

    use super::*;

    #[tokio::test]
    async fn test_second_operation_waits_for_first() {
        // テスト項目: 先に入った操作が終わるまで次の操作は区間に入れない
        // given (前提条件):
        let dispatcher = Arc::new(Dispatcher::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let guard = dispatcher.enter().await;

        // when (操作):
        let waiter = {
            let dispatcher = dispatcher.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let _turn = dispatcher.enter().await;
                tx.send("second").unwrap();
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        tx.send("first").unwrap();
        drop(guard);
        waiter.await.unwrap();

        // then (期待する結果):
        assert_eq!(rx.recv().await, Some("first"));
        assert_eq!(rx.recv().await, Some("second"));
    }
}
