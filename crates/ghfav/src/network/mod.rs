//! Network operations
//!
//! HTTP client shared by lookup implementations.

pub mod client;

pub use client::{ClientOptions, HttpClient};
