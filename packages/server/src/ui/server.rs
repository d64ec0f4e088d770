//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, RenameParticipantUseCase,
    SendMessageUseCase,
};

use super::{handler::websocket_handler, signal::shutdown_signal, state::AppState};

/// WebSocket chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_participant_usecase,
///     disconnect_participant_usecase,
///     send_message_usecase,
///     rename_participant_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 3000).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `connect_participant_usecase` - UseCase for participant connection
    /// * `disconnect_participant_usecase` - UseCase for participant disconnection
    /// * `send_message_usecase` - UseCase for message sending
    /// * `rename_participant_usecase` - UseCase for display name changes
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        rename_participant_usecase: Arc<RenameParticipantUseCase>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                connect_participant_usecase,
                disconnect_participant_usecase,
                send_message_usecase,
                rename_participant_usecase,
            }),
        }
    }

    /// Build the router
    ///
    /// WebSocket upgrades are accepted on any path. Every other request
    /// falls through to `404 Not Found`.
    pub fn router(&self) -> Router {
        Router::new()
            .fallback(websocket_handler)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server until Ctrl+C or SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 3000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> std::io::Result<()> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Connect to: ws://{}", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!(
            "WebSocket chat relay listening on {}",
            listener.local_addr()?
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
