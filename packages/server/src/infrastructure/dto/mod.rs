//! Data Transfer Objects (DTOs) for the chat relay.
//!
//! - `websocket`: wire envelopes exchanged over the socket
//! - `codec`: JSON encoding/decoding of those envelopes
//! - `conversion`: mapping between DTOs and domain types

pub mod codec;
pub mod conversion;
pub mod websocket;
