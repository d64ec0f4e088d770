//! Plain HTTP handling.
//!
//! The relay exposes no HTTP resources. Every request that is not a
//! WebSocket upgrade is answered with `404 Not Found`.

use axum::http::StatusCode;

pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
