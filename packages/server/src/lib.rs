//! Relay server for Tsudoi, an ephemeral real-time chat.
//!
//! Layers:
//!
//! - `domain`: registry, message log, events and the traits the other layers implement
//! - `infrastructure`: in-memory repository, WebSocket pusher and the wire DTOs
//! - `usecase`: connect / send / rename / disconnect, serialized by a single dispatcher
//! - `ui`: axum router, connection handler and shutdown handling

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

use std::sync::Arc;

use tsudoi_shared::time::{Clock, SystemClock};

use crate::{
    config::ServerConfig,
    domain::{ChatRoom, IdFactory, RandomIdFactory},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryChatRepository},
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, Dispatcher,
        RenameParticipantUseCase, SendMessageUseCase,
    },
};

/// Wire up the server with random ids and the system clock
pub fn build_server(config: &ServerConfig) -> Server {
    build_server_with(config, Arc::new(RandomIdFactory), Arc::new(SystemClock))
}

/// Wire up the server with the given id source and clock
///
/// Initialize dependencies in order:
/// 1. Repository
/// 2. MessagePusher
/// 3. UseCases (sharing one Dispatcher)
/// 4. Server
pub fn build_server_with(
    config: &ServerConfig,
    ids: Arc<dyn IdFactory>,
    clock: Arc<dyn Clock>,
) -> Server {
    let repository = Arc::new(InMemoryChatRepository::new(
        ChatRoom::with_capacity(config.history_capacity),
        ids.clone(),
    ));
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let dispatcher = Arc::new(Dispatcher::new());

    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        dispatcher.clone(),
        config.snapshot_size,
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        dispatcher.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        dispatcher.clone(),
        ids,
        clock,
    ));
    let rename_participant_usecase = Arc::new(RenameParticipantUseCase::new(
        repository,
        message_pusher,
        dispatcher,
    ));

    Server::new(
        connect_participant_usecase,
        disconnect_participant_usecase,
        send_message_usecase,
        rename_participant_usecase,
    )
}
