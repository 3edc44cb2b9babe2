//! Game module - level lifecycle and player interaction

mod session;

pub use session::{MapSession, SessionError};
