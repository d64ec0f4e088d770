//! Client execution logic with reconnection support.

use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;

use crate::{
    ClientConfig,
    error::ClientError,
    formatter::MessageFormatter,
    input::{InputCommand, parse_input},
    name_store::{MemoryNameStore, NameStore},
    reconnect::{ReconnectSupervisor, ReconnectTimer},
    session::{SessionEnd, run_session},
    state::{ClientEvent, ClientState, reduce},
    ui::show,
};

/// Run the chat client until the user quits or the attempt cap is reached
///
/// # Arguments
///
/// * `config` - Server URL, initial name and attempt cap
/// * `input` - Lines typed by the user; the client quits when it closes
pub async fn run_client(
    config: ClientConfig,
    mut input: mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let mut supervisor = ReconnectSupervisor::new(config.max_attempts);
    let mut timer = ReconnectTimer::default();
    let mut names = MemoryNameStore::new(config.name.clone());
    let mut state = ClientState::default();

    loop {
        if !supervisor.try_begin_attempt() {
            return Err(ClientError::ConnectionError(
                "a connection attempt is already in progress".to_string(),
            ));
        }
        if let Some(notice) = supervisor.attempt_notice() {
            show(&MessageFormatter::format_notice(notice));
        }

        tracing::info!(
            "Attempting to connect to {} (attempt {})",
            config.url,
            supervisor.attempt() + 1
        );
        match connect_async(config.url.as_str()).await {
            Ok((socket, _)) => {
                timer.cancel();
                show(&MessageFormatter::format_notice(supervisor.on_open()));
                state = reduce(state, ClientEvent::ConnectionStatus(true));

                let end = run_session(socket, &mut state, &mut names, &mut input).await?;
                state = reduce(state, ClientEvent::ConnectionStatus(false));
                if end == SessionEnd::Quit {
                    tracing::info!("Client session ended normally");
                    return Ok(());
                }
            }
            Err(e) => tracing::warn!("Failed to connect: {}", e),
        }

        let outcome = supervisor.on_close();
        for notice in outcome.notices {
            show(&MessageFormatter::format_notice(notice));
        }
        let Some(delay) = outcome.retry_after else {
            tracing::error!("Giving up after {} attempts", supervisor.attempt());
            return Err(ClientError::AttemptsExhausted(supervisor.attempt()));
        };

        tracing::info!("Reconnecting in {:?}", delay);
        timer.schedule(delay);
        if wait_offline(&mut timer, &mut input, &state, &mut names).await == SessionEnd::Quit {
            return Ok(());
        }
    }
}

/// Wait for the reconnect timer while still answering local commands.
///
/// Returns [`SessionEnd::Quit`] if the user leaves before the timer fires.
async fn wait_offline(
    timer: &mut ReconnectTimer,
    input: &mut mpsc::UnboundedReceiver<String>,
    state: &ClientState,
    names: &mut dyn NameStore,
) -> SessionEnd {
    loop {
        tokio::select! {
            _ = timer.fired() => return SessionEnd::Lost,
            line = input.recv() => {
                let Some(line) = line else {
                    return SessionEnd::Quit;
                };
                match parse_input(&line) {
                    InputCommand::Quit => return SessionEnd::Quit,
                    InputCommand::Rename(name) => names.save(&name),
                    InputCommand::Who => {
                        let self_id = state.self_id.as_deref().unwrap_or_default();
                        show(&MessageFormatter::format_user_list(&state.users, self_id));
                    }
                    InputCommand::Say(_) => show(&MessageFormatter::format_offline()),
                    InputCommand::Empty => {}
                }
            }
        }
    }
}
