//! Terminal client for Tsudoi, an ephemeral real-time chat.

pub mod error;
pub mod formatter;
pub mod input;
pub mod name_store;
pub mod reconnect;
pub mod runner;
pub mod session;
pub mod state;
pub mod ui;

pub use error::ClientError;
pub use runner::run_client;

pub const DEFAULT_URL: &str = "ws://127.0.0.1:3000";

/// Settings collected from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub url: String,
    /// Display name to apply after every connect
    pub name: Option<String>,
    /// Give up after this many consecutive failed attempts
    pub max_attempts: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            name: None,
            max_attempts: None,
        }
    }
}
