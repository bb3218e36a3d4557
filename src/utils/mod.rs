//! Utility functions
//!
//! Logging setup and input parsing for the command line front end.

pub mod logging;
pub mod validation;
