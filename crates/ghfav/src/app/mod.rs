//! Application layer
//!
//! Session state, the command loop that owns it, and the snapshot that
//! front ends render.

pub mod controller;
pub mod session;
pub mod state;

pub use controller::AppController;
pub use session::{FavoritesSession, Notice};
pub use state::{AppCommand, AppSnapshot};
