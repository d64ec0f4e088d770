//! Client-side view of the chat room.
//!
//! [`reduce`] is the only way the state changes. It is a total, pure
//! function of the previous state and one event, so every transition can be
//! tested without a socket.

use tsudoi_server::infrastructure::dto::websocket::{
    ChatMessage, InitPayload, ServerEvent, User, UserLeftPayload, UserRenamedPayload,
};

/// Local state of one client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    /// Messages in the order the server broadcast them
    pub messages: Vec<ChatMessage>,
    /// Present users, unique by id, in join order
    pub users: Vec<User>,
    /// Id assigned by the server in the last `init`
    pub self_id: Option<String>,
    pub connected: bool,
}

/// Input to the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Server(ServerEvent),
    /// Transport opened (`true`) or lost (`false`)
    ConnectionStatus(bool),
}

impl ClientState {
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// The user this client is connected as
    pub fn current_user(&self) -> Option<&User> {
        self.self_id.as_deref().and_then(|id| self.user(id))
    }

    /// Display name for `id`, falling back to the raw id for unknown users
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.user(id).map(|u| u.name.as_str()).unwrap_or(id)
    }

    pub fn is_self(&self, id: &str) -> bool {
        self.self_id.as_deref() == Some(id)
    }
}

/// Apply one event to the state
pub fn reduce(mut state: ClientState, event: ClientEvent) -> ClientState {
    match event {
        ClientEvent::ConnectionStatus(connected) => {
            state.connected = connected;
        }
        ClientEvent::Server(ServerEvent::Init(InitPayload {
            messages,
            users,
            user_id,
        })) => {
            state.messages = messages;
            state.users = users;
            state.self_id = Some(user_id);
        }
        ClientEvent::Server(ServerEvent::NewMessage(message)) => {
            state.messages.push(message);
        }
        ClientEvent::Server(ServerEvent::UserJoined(user)) => {
            if state.user(&user.id).is_none() {
                state.users.push(user);
            }
        }
        ClientEvent::Server(ServerEvent::UserRenamed(UserRenamedPayload {
            id, new_name, ..
        })) => {
            if let Some(user) = state.users.iter_mut().find(|u| u.id == id) {
                user.name = new_name;
            }
        }
        ClientEvent::Server(ServerEvent::UserLeft(UserLeftPayload { id })) => {
            state.users.retain(|u| u.id != id);
        }
    }
    state
}
