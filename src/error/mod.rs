//! Error handling
//!
//! Defines error types and handling for handler assembly.

pub mod handlers;
pub mod types;

pub use types::*;
