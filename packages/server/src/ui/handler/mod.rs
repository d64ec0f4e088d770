//! Request handlers.

mod http;
mod websocket;

pub use websocket::websocket_handler;
