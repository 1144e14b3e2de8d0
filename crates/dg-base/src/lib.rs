pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use error::DeckError;
pub use types::{ButtonConfig, Cell};
