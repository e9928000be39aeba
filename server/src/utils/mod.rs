//! Shared utilities

pub mod api_key;
pub mod crypto;
pub mod debug;
pub mod file;
pub mod time;
