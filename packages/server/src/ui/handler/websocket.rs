//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    response::{IntoResponse, Response},
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, Stream, StreamExt},
};
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::{
        ConnectionEvent, ConnectionState, DisplayName, MessageContent, UserId, outbound_channel,
    },
    infrastructure::dto::{codec::decode_command, websocket::ClientCommand},
    ui::state::AppState,
};

use super::http::not_found;

/// Entry point for every request on every path.
///
/// Requests that carry a valid WebSocket upgrade become chat connections.
/// Anything else is answered with `404 Not Found`.
pub async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    match ws {
        Ok(ws) => ws
            .on_upgrade(move |socket| handle_socket(socket, state))
            .into_response(),
        Err(rejection) => {
            tracing::debug!("Non-upgrade request rejected: {}", rejection);
            not_found().await.into_response()
        }
    }
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// The channel is fed by the MessagePusher, so every frame this connection
/// receives is written in the order it was enqueued. The task ends when the
/// channel is closed (including when the pusher drops a client whose queue is
/// full) or the socket refuses a write.
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let mut connection = ConnectionState::Connecting;
    let (sender, receiver) = socket.split();

    // Create a bounded channel for this client to receive messages
    let (tx, rx) = outbound_channel();

    // 登録・init 送信・user-joined 配信は UseCase 内で一括して行う
    let user = match state.connect_participant_usecase.execute(tx).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Failed to register new connection: {}", e);
            return;
        }
    };
    connection = connection.next(ConnectionEvent::Established);
    tracing::info!("User '{}' connected as '{}'", user.id, user.name);

    let (stop_tx, stop_rx) = oneshot::channel();
    let mut send_task = pusher_loop(rx, sender);
    let mut recv_task = tokio::spawn(receive_loop(
        receiver,
        state.clone(),
        user.id.clone(),
        connection,
        stop_rx,
    ));

    // If any one of the tasks completes, stop the other.
    // The receive loop is never aborted: a frame already being dispatched
    // must finish both its log append and its broadcast.
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => {
            let _ = stop_tx.send(());
            if let Err(e) = (&mut recv_task).await {
                tracing::warn!("Receive task of '{}' failed: {}", user.id, e);
            }
        }
    };
    connection = connection.next(ConnectionEvent::TransportClosed);
    tracing::debug!("Connection of '{}' is now {:?}", user.id, connection);

    match state
        .disconnect_participant_usecase
        .execute(user.id.clone())
        .await
    {
        Ok(Some(_)) => tracing::info!("User '{}' disconnected", user.id),
        Ok(None) => {}
        Err(e) => tracing::warn!("Failed to broadcast user-left for '{}': {}", user.id, e),
    }
}

/// Reads inbound frames until the transport closes or `stop` fires.
///
/// `stop` is only observed between frames, so a dispatch that has started
/// always runs to completion.
async fn receive_loop<S>(
    mut receiver: S,
    state: Arc<AppState>,
    user_id: UserId,
    mut connection: ConnectionState,
    mut stop: oneshot::Receiver<()>,
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    while connection.accepts_frames() {
        let next = tokio::select! {
            _ = &mut stop => {
                tracing::debug!("Receive loop of '{}' stopped", user_id);
                None
            }
            msg = receiver.next() => msg,
        };
        let Some(msg) = next else {
            connection = connection.next(ConnectionEvent::TransportClosed);
            continue;
        };

        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket error on '{}': {}", user_id, e);
                connection = connection.next(ConnectionEvent::TransportClosed);
                continue;
            }
        };

        match msg {
            Message::Text(text) => {
                connection = connection.next(ConnectionEvent::FrameReceived);
                handle_text_frame(&state, &user_id, text.as_str()).await;
            }
            Message::Close(_) => {
                tracing::debug!("User '{}' requested close", user_id);
                connection = connection.next(ConnectionEvent::TransportClosed);
            }
            // Ping/pong is handled by the WebSocket protocol layer
            _ => {}
        }
    }
}

async fn handle_text_frame(state: &AppState, user_id: &UserId, text: &str) {
    let command = match decode_command(text) {
        Ok(command) => command,
        Err(e) => {
            tracing::warn!("Discarding malformed frame from '{}': {}", user_id, e);
            return;
        }
    };
    if command.is_blank() {
        tracing::debug!("Ignoring blank command from '{}'", user_id);
        return;
    }

    match command {
        ClientCommand::Message { content } => {
            let Ok(content) = MessageContent::new(content) else {
                return;
            };
            if let Err(e) = state
                .send_message_usecase
                .execute(user_id.clone(), content)
                .await
            {
                tracing::warn!("Failed to send message from '{}': {}", user_id, e);
            }
        }
        ClientCommand::SetName { name } => {
            let Ok(name) = DisplayName::new(name) else {
                return;
            };
            match state
                .rename_participant_usecase
                .execute(user_id.clone(), name)
                .await
            {
                Ok((old, new)) => {
                    tracing::info!("User '{}' renamed '{}' -> '{}'", user_id, old, new)
                }
                Err(e) => tracing::warn!("Failed to rename '{}': {}", user_id, e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures_util::stream;
    use tsudoi_shared::time::FixedClock;

    use super::*;
    use crate::{
        domain::{ChatRepository, ChatRoom, MessagePusher, factory::testing::SequentialIdFactory},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryChatRepository,
        },
        usecase::{
            ConnectParticipantUseCase, DisconnectParticipantUseCase, Dispatcher,
            RenameParticipantUseCase, SendMessageUseCase,
        },
    };

    struct Fixture {
        repository: Arc<InMemoryChatRepository>,
        pusher: Arc<WebSocketMessagePusher>,
        dispatcher: Arc<Dispatcher>,
        state: Arc<AppState>,
    }

    fn create_fixture() -> Fixture {
        let repository = Arc::new(InMemoryChatRepository::new(
            ChatRoom::new(),
            Arc::new(SequentialIdFactory::new()),
        ));
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let dispatcher = Arc::new(Dispatcher::new());
        let state = Arc::new(AppState {
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
                repository.clone(),
                pusher.clone(),
                dispatcher.clone(),
                50,
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                repository.clone(),
                pusher.clone(),
                dispatcher.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                repository.clone(),
                pusher.clone(),
                dispatcher.clone(),
                Arc::new(SequentialIdFactory::new()),
                Arc::new(FixedClock::new(1_700_000_000_000)),
            )),
            rename_participant_usecase: Arc::new(RenameParticipantUseCase::new(
                repository.clone(),
                pusher.clone(),
                dispatcher.clone(),
            )),
        });
        Fixture {
            repository,
            pusher,
            dispatcher,
            state,
        }
    }

    fn text(json: &str) -> Result<Message, axum::Error> {
        Ok(Message::Text(json.to_string().into()))
    }

    #[tokio::test]
    async fn test_stop_during_dispatch_still_broadcasts_logged_message() {
        // テスト項目: 送信処理中に停止要求が来ても、履歴追加と配信の両方が完了してからループが終わる
        // given (前提条件):
        let fixture = create_fixture();
        let sender = fixture.repository.register_user().await.unwrap();
        let listener = fixture.repository.register_user().await.unwrap();
        let (tx, mut listener_rx) = outbound_channel();
        fixture.pusher.register_client(listener.id, tx).await;

        // 他の処理が順番を握っている間にフレームが届く
        let turn = fixture.dispatcher.enter().await;
        let frames = stream::iter(vec![text(r#"{"type":"message","content":"hello"}"#)])
            .chain(stream::pending());
        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(receive_loop(
            frames,
            fixture.state.clone(),
            sender.id.clone(),
            ConnectionState::Open,
            stop_rx,
        ));
        tokio::time::sleep(Duration::from_millis(50)).await;

        // when (操作): ソケットの送信側が落ちた扱いで停止を要求し、順番を解放する
        stop_tx.send(()).unwrap();
        drop(turn);

        // then (期待する結果):
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("receive loop should stop")
            .unwrap();
        let logged = fixture.repository.recent_messages(10).await;
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].content.as_str(), "hello");
        let frame = listener_rx.try_recv().unwrap();
        assert!(frame.starts_with(r#"{"type":"new-message""#));
        assert!(frame.contains("hello"));
    }

    #[tokio::test]
    async fn test_stop_between_frames_ends_loop() {
        // テスト項目: フレーム待ちの間に停止要求が来るとループが終了する
        // given (前提条件):
        let fixture = create_fixture();
        let user = fixture.repository.register_user().await.unwrap();
        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(receive_loop(
            stream::pending::<Result<Message, axum::Error>>(),
            fixture.state.clone(),
            user.id,
            ConnectionState::Open,
            stop_rx,
        ));

        // when (操作):
        stop_tx.send(()).unwrap();

        // then (期待する結果):
        assert!(
            tokio::time::timeout(Duration::from_secs(1), task)
                .await
                .is_ok()
        );
        assert!(fixture.repository.recent_messages(10).await.is_empty());
    }
}
