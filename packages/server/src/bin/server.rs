//! Ephemeral real-time chat relay.
//!
//! Every WebSocket client shares one room. Messages live only in memory and
//! are lost when the server stops.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsudoi-server
//! cargo run --bin tsudoi-server -- --host 0.0.0.0 --port 3000
//! ```

use clap::Parser;
use tsudoi_server::{
    build_server,
    config::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig},
    domain::{DEFAULT_HISTORY_CAPACITY, DEFAULT_SNAPSHOT_SIZE},
};
use tsudoi_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tsudoi-server")]
#[command(about = "Ephemeral WebSocket chat relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Maximum number of messages kept in memory
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history_capacity: usize,

    /// Number of recent messages sent to a newly connected client
    #[arg(long, default_value_t = DEFAULT_SNAPSHOT_SIZE)]
    snapshot_size: usize,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            history_capacity: args.history_capacity,
            snapshot_size: args.snapshot_size,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::from(Args::parse());
    tracing::debug!("Starting with {:?}", config);

    let server = build_server(&config);
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
