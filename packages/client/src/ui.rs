//! Terminal I/O for the client.

use std::io::Write;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

pub const PROMPT: &str = "> ";

/// Print rendered output and redisplay the prompt
pub fn show(text: &str) {
    print!("{}", text);
    redisplay_prompt();
}

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt() {
    print!("{}", PROMPT);
    std::io::stdout().flush().ok();
}

/// Read lines on a dedicated thread (rustyline is synchronous).
///
/// The channel closes on Ctrl+C, Ctrl+D or a readline error.
pub fn spawn_input_thread() -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line).ok();
                    if input_tx.send(line.to_string()).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
