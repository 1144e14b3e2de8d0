pub mod actions;
mod app;
pub mod events;
pub mod mouse;

use std::time::{SystemTime, UNIX_EPOCH};

pub use app::App;

/// Get current time in milliseconds since UNIX epoch
pub fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}
