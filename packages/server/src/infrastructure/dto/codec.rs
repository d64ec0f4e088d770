//! JSON codec for the wire envelopes.
//!
//! Inbound strings are trimmed during decoding so that every consumer sees
//! the same normalized payload. Whether a blank payload is dropped is decided
//! by the caller ([`ClientCommand::is_blank`]).

use thiserror::Error;

use super::websocket::{ClientCommand, ServerEvent};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode envelope: {0}")]
    Encode(#[source] serde_json::Error),

    /// Malformed JSON, unknown `type` tag or missing payload fields
    #[error("failed to decode envelope: {0}")]
    Decode(#[source] serde_json::Error),
}

pub fn encode_event(event: &ServerEvent) -> Result<String, CodecError> {
    serde_json::to_string(event).map_err(CodecError::Encode)
}

pub fn decode_event(text: &str) -> Result<ServerEvent, CodecError> {
    serde_json::from_str(text).map_err(CodecError::Decode)
}

pub fn encode_command(command: &ClientCommand) -> Result<String, CodecError> {
    serde_json::to_string(command).map_err(CodecError::Encode)
}

/// Decode an inbound frame and trim its text payload
pub fn decode_command(text: &str) -> Result<ClientCommand, CodecError> {
    let command = serde_json::from_str(text).map_err(CodecError::Decode)?;
    Ok(match command {
        ClientCommand::Message { content } => ClientCommand::Message {
            content: content.trim().to_string(),
        },
        ClientCommand::SetName { name } => ClientCommand::SetName {
            name: name.trim().to_string(),
        },
    })
}
