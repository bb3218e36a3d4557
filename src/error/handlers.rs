//! Error handlers
//!
//! Reports configuration failures and maps them to process exit codes.

use crate::error::types::ConfigError;
use log::error;

/// Log a configuration error that prevents the handler from starting.
pub fn handle_error(err: &ConfigError) {
    error!("Refusing to start authentication handler: {}", err);
}

/// Convert error to a process exit code.
pub fn error_to_exit_code(err: &ConfigError) -> i32 {
    match err {
        ConfigError::Source(_) => 66,
        ConfigError::MissingUsers
        | ConfigError::NullPassword(_)
        | ConfigError::PasswordNotString(_)
        | ConfigError::UsersFromEnvironment(_)
        | ConfigError::UnknownEncoder(_) => 78,
    }
}
