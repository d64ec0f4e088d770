//! Message formatting utilities for client display.

use tsudoi_server::infrastructure::dto::websocket::{InitPayload, ServerEvent, User};
use tsudoi_shared::time::timestamp_to_jst_rfc3339;

use crate::{reconnect::ConnectionNotice, state::ClientState};

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Render a server event.
    ///
    /// Names are resolved from `state` as it was *before* the event is
    /// reduced, so a user who leaves is still known by name.
    ///
    /// # Returns
    ///
    /// `None` for events that have nothing worth showing
    pub fn format_event(event: &ServerEvent, state: &ClientState) -> Option<String> {
        match event {
            ServerEvent::Init(payload) => Some(Self::format_init(payload)),
            ServerEvent::NewMessage(message) => Some(Self::format_chat_message(
                &Self::label(state, &message.sender),
                &message.content,
                message.timestamp,
            )),
            ServerEvent::UserJoined(user) if state.is_self(&user.id) => None,
            ServerEvent::UserJoined(user) => Some(Self::format_user_joined(&user.name)),
            ServerEvent::UserRenamed(payload) => Some(Self::format_user_renamed(
                &payload.old_name,
                &payload.new_name,
            )),
            ServerEvent::UserLeft(payload) => state
                .user(&payload.id)
                .map(|user| Self::format_user_left(&user.name)),
        }
    }

    /// Format the `init` snapshot: participants, then the recent history
    pub fn format_init(payload: &InitPayload) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{}\n", RULE));
        output.push_str(&Self::format_user_list(&payload.users, &payload.user_id));

        if !payload.messages.is_empty() {
            output.push_str(&format!("{}\n", RULE));
            output.push_str(&format!(
                "Recent messages ({}):\n",
                payload.messages.len()
            ));
            for message in &payload.messages {
                let name = payload
                    .users
                    .iter()
                    .find(|u| u.id == message.sender)
                    .map(|u| u.name.as_str())
                    .unwrap_or(message.sender.as_str());
                output.push_str(&format!(
                    "[{}] {}: {}\n",
                    timestamp_to_jst_rfc3339(message.timestamp),
                    name,
                    message.content
                ));
            }
        }

        output.push_str(&format!("{}\n", RULE));
        output
    }

    /// Format the participant list, marking the current user with "(me)"
    pub fn format_user_list(users: &[User], self_id: &str) -> String {
        let mut output = String::from("Participants:\n");
        if users.is_empty() {
            output.push_str("(No participants)\n");
        }
        for user in users {
            let me_suffix = if user.id == self_id { " (me)" } else { "" };
            output.push_str(&format!("{}{}\n", user.name, me_suffix));
        }
        output
    }

    pub fn format_user_joined(name: &str) -> String {
        format!("\n+ {} joined the chat\n", name)
    }

    pub fn format_user_renamed(old_name: &str, new_name: &str) -> String {
        format!("\n* {} renamed to {}\n", old_name, new_name)
    }

    pub fn format_user_left(name: &str) -> String {
        format!("\n- {} left the chat\n", name)
    }

    /// Format a chat message
    ///
    /// # Arguments
    ///
    /// * `from` - Display name of the sender
    /// * `content` - The message content
    /// * `sent_at` - Unix timestamp when the server accepted the message (milliseconds)
    pub fn format_chat_message(from: &str, content: &str, sent_at: i64) -> String {
        let timestamp_str = timestamp_to_jst_rfc3339(sent_at);
        format!(
            "\n\n{rule}\n\
             @{}: {}\n\
             sent at {}\n\
             {rule}\n",
            from,
            content,
            timestamp_str,
            rule = THIN_RULE
        )
    }

    pub fn format_notice(notice: ConnectionNotice) -> String {
        match notice {
            ConnectionNotice::Connected => "\n[connected to chat server]\n".to_string(),
            ConnectionNotice::Reconnected => "\n[reconnected to chat server]\n".to_string(),
            ConnectionNotice::Disconnected => "\n[disconnected from chat server]\n".to_string(),
            ConnectionNotice::Reconnecting { attempt } => {
                format!("\n[attempting to reconnect... (attempt {})]\n", attempt)
            }
            ConnectionNotice::ConnectionError => "\n[connection error]\n".to_string(),
        }
    }

    pub fn format_offline() -> String {
        "\n[not connected, message not sent]\n".to_string()
    }

    fn label(state: &ClientState, id: &str) -> String {
        let name = state.display_name(id);
        if state.is_self(id) {
            format!("{} (me)", name)
        } else {
            name.to_string()
        }
    }
}
