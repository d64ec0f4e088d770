//! Server configuration.

use crate::domain::{DEFAULT_HISTORY_CAPACITY, DEFAULT_SNAPSHOT_SIZE};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Settings collected from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum number of messages kept in memory
    pub history_capacity: usize,
    /// Number of recent messages sent in `init`
    pub snapshot_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            snapshot_size: DEFAULT_SNAPSHOT_SIZE,
        }
    }
}
