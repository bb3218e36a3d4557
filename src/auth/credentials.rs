//! Credential types
//!
//! Credentials presented to an authentication handler. They are transient and
//! never stored.

use std::fmt;

/// A username and plaintext password presented for validation.
#[derive(Clone, PartialEq, Eq)]
pub struct UsernamePasswordCredentials {
    pub username: String,
    pub password: String,
}

impl UsernamePasswordCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keep plaintext passwords out of debug output and logs.
impl fmt::Debug for UsernamePasswordCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsernamePasswordCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Every kind of credential a handler chain may hand to its handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    UsernamePassword(UsernamePasswordCredentials),
    Token(String),
}

impl From<UsernamePasswordCredentials> for Credentials {
    fn from(credentials: UsernamePasswordCredentials) -> Self {
        Credentials::UsernamePassword(credentials)
    }
}
