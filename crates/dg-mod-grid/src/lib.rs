//! Grid state and the cell edit session.
//!
//! - `store` — `GridStore`, the row-major button grid, and dimension coercion
//! - `session` — `EditSession`, the staged edit of one cell
//! - `timer` — `CloseSchedule`, delayed redemption of session close tickets

pub mod session;
pub mod store;
pub mod timer;

pub use session::{CloseTicket, EditSession, SessionPhase, split_args};
pub use store::{GridStore, parse_dimension};
pub use timer::CloseSchedule;
