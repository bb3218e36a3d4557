//! Error types
//!
//! Configuration errors raised while assembling an authentication handler.
//! Rejected credentials are not errors and never show up here.

use std::fmt;

/// Fatal configuration errors. A handler is never put into service while one
/// of these is outstanding.
#[derive(Debug)]
pub enum ConfigError {
    /// The users mapping was not supplied at all.
    MissingUsers,
    /// A user was configured with a null password.
    NullPassword(String),
    /// A user's password is present but is not a string.
    PasswordNotString(String),
    /// Accepted users were supplied through environment overrides.
    UsersFromEnvironment(String),
    /// The configured password encoder name is not recognised.
    UnknownEncoder(String),
    /// The underlying configuration sources could not be read or parsed.
    Source(config::ConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingUsers => write!(f, "the users map cannot be null"),
            ConfigError::NullPassword(user) => {
                write!(f, "cannot have null password for user [{}]", user)
            }
            ConfigError::PasswordNotString(user) => {
                write!(f, "the password must be a string for [{}]", user)
            }
            ConfigError::UsersFromEnvironment(names) => write!(
                f,
                "accepted users must come from the configuration file, not the environment: {}",
                names
            ),
            ConfigError::UnknownEncoder(name) => write!(f, "unknown password encoder: {}", name),
            ConfigError::Source(e) => write!(f, "configuration source error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Source(e) => Some(e),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(error: config::ConfigError) -> Self {
        ConfigError::Source(error)
    }
}
