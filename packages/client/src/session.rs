//! One WebSocket session, from open until the transport closes or the user quits.

use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::protocol::Message};
use tsudoi_server::infrastructure::dto::{
    codec::{decode_event, encode_command},
    websocket::{ClientCommand, ServerEvent},
};

use crate::{
    error::ClientError,
    formatter::MessageFormatter,
    input::{InputCommand, parse_input},
    name_store::{NameStore, name_to_apply},
    state::{ClientEvent, ClientState, reduce},
    ui::show,
};

pub type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;
type Writer = SplitSink<Socket, Message>;
type Reader = SplitStream<Socket>;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user asked to leave
    Quit,
    /// The transport closed or failed
    Lost,
}

/// Drive one open connection
///
/// Server events are rendered and reduced into `state`. Lines from `input`
/// are turned into commands. Received state is kept when the session ends.
pub async fn run_session(
    socket: Socket,
    state: &mut ClientState,
    names: &mut dyn NameStore,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<SessionEnd, ClientError> {
    let (mut write, mut read) = socket.split();

    loop {
        tokio::select! {
            frame = next_event(&mut read) => {
                let Some(event) = frame else {
                    return Ok(SessionEnd::Lost);
                };
                if !apply_event(event, state, &*names, &mut write).await? {
                    return Ok(SessionEnd::Lost);
                }
            }
            line = input.recv() => {
                let Some(line) = line else {
                    let _ = write.close().await;
                    return Ok(SessionEnd::Quit);
                };
                if let Some(end) = handle_input(&line, state, names, &mut write).await? {
                    return Ok(end);
                }
            }
        }
    }
}

/// Next decodable server event, or `None` once the transport is gone
async fn next_event(read: &mut Reader) -> Option<ServerEvent> {
    loop {
        match read.next().await? {
            Ok(Message::Text(text)) => match decode_event(text.as_str()) {
                Ok(event) => return Some(event),
                Err(e) => tracing::warn!("Ignoring undecodable frame: {}", e),
            },
            Ok(Message::Close(_)) => {
                tracing::info!("Server closed the connection");
                return None;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("WebSocket read error: {}", e);
                return None;
            }
        }
    }
}

/// Render and reduce one event. Returns `false` if the transport failed.
async fn apply_event(
    event: ServerEvent,
    state: &mut ClientState,
    names: &dyn NameStore,
    write: &mut Writer,
) -> Result<bool, ClientError> {
    let is_init = matches!(event, ServerEvent::Init(_));
    if let Some(rendered) = MessageFormatter::format_event(&event, state) {
        show(&rendered);
    }
    *state = reduce(std::mem::take(state), ClientEvent::Server(event));

    if is_init && let Some(name) = name_to_apply(state, names) {
        return send_command(write, &ClientCommand::SetName { name }).await;
    }
    Ok(true)
}

/// Act on one input line. Returns `Some` when the session should end.
async fn handle_input(
    line: &str,
    state: &ClientState,
    names: &mut dyn NameStore,
    write: &mut Writer,
) -> Result<Option<SessionEnd>, ClientError> {
    let sent = match parse_input(line) {
        InputCommand::Say(content) => {
            send_command(write, &ClientCommand::Message { content }).await?
        }
        InputCommand::Rename(name) => {
            names.save(&name);
            send_command(write, &ClientCommand::SetName { name }).await?
        }
        InputCommand::Who => {
            let self_id = state.self_id.as_deref().unwrap_or_default();
            show(&MessageFormatter::format_user_list(&state.users, self_id));
            true
        }
        InputCommand::Quit => {
            let _ = write.close().await;
            return Ok(Some(SessionEnd::Quit));
        }
        InputCommand::Empty => true,
    };
    Ok((!sent).then_some(SessionEnd::Lost))
}

/// Encode and send a command. Returns `false` if the transport failed.
async fn send_command(write: &mut Writer, command: &ClientCommand) -> Result<bool, ClientError> {
    let json = encode_command(command)?;
    if let Err(e) = write.send(Message::Text(json.into())).await {
        tracing::warn!("Failed to send command: {}", e);
        return Ok(false);
    }
    Ok(true)
}
