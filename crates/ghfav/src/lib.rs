//! ghfav: GitHub user favorites
//!
//! User lookup, favorites persistence, and the session state that
//! front ends bind to.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod lookup;
pub mod network;
