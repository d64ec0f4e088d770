//! Utilities shared by the Tsudoi server and client binaries.

pub mod logger;
pub mod time;
