//! Terminal chat client.
//!
//! Type a line and press Enter to send it. `/name <new>` changes your display
//! name, `/who` lists who is online and `/quit` exits.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsudoi-client
//! cargo run --bin tsudoi-client -- --url ws://127.0.0.1:3000 --name alice
//! ```

use clap::Parser;
use tsudoi_client::{ClientConfig, DEFAULT_URL, run_client, ui::spawn_input_thread};
use tsudoi_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tsudoi-client")]
#[command(about = "Terminal client for the Tsudoi chat relay", long_about = None)]
struct Args {
    /// WebSocket server URL to connect to
    #[arg(short, long, default_value = DEFAULT_URL)]
    url: String,

    /// Display name to use in the chat
    #[arg(short, long)]
    name: Option<String>,

    /// Exit after this many consecutive failed connection attempts
    #[arg(long)]
    max_attempts: Option<u32>,
}

impl From<Args> for ClientConfig {
    fn from(args: Args) -> Self {
        Self {
            url: args.url,
            name: args.name,
            max_attempts: args.max_attempts,
        }
    }
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let config = ClientConfig::from(Args::parse());
    println!("\nType messages and press Enter to send. /name <new> renames, /who lists users, /quit exits.\n");

    let input = spawn_input_thread();
    if let Err(e) = run_client(config, input).await {
        tracing::error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
