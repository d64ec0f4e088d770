//! Error types for the chat client.

use thiserror::Error;
use tsudoi_server::infrastructure::dto::codec::CodecError;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport could not be opened or failed mid-session
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Too many consecutive failed connection attempts
    #[error("Gave up after {0} consecutive connection attempts")]
    AttemptsExhausted(u32),

    #[error(transparent)]
    Codec(#[from] CodecError),
}
