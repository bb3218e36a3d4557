//! Accept-users authentication handler
//!
//! Validates username/password credentials against a fixed set of accepted
//! users. Meant to sit in a chain next to directory or database backed
//! handlers, answering only for the handful of extra accounts it was given.

use std::fmt;
use std::sync::Arc;

use config::{Map, Value};
use log::{debug, info};

use super::credentials::{Credentials, UsernamePasswordCredentials};
use super::encoder::{PasswordEncoder, PlainTextPasswordEncoder};
use super::store::CredentialStore;
use crate::config::HandlerConfig;
use crate::error::ConfigError;

const DEFAULT_NAME: &str = "AcceptUsersAuthenticationHandler";

/// One link of an authentication chain.
///
/// The result is a plain decision so the chain is free to short-circuit on
/// the first success or to consult every handler.
pub trait AuthenticationHandler: Send + Sync {
    /// Whether this handler knows how to judge the given kind of credentials.
    fn supports(&self, credentials: &Credentials) -> bool;

    /// Returns `true` if the credentials are valid for this handler.
    fn authenticate(&self, credentials: &Credentials) -> bool;

    fn name(&self) -> &str;
}

/// Collects handler settings before validation.
///
/// Nothing can authenticate until [`build`](Self::build) has checked the
/// configuration and produced an [`AcceptUsersAuthenticationHandler`].
#[derive(Default)]
pub struct AcceptUsersAuthenticationHandlerBuilder {
    users: Option<Result<CredentialStore, ConfigError>>,
    encoder: Option<Arc<dyn PasswordEncoder>>,
    name: Option<String>,
}

impl AcceptUsersAuthenticationHandlerBuilder {
    pub fn users(mut self, store: CredentialStore) -> Self {
        self.users = Some(Ok(store));
        self
    }

    /// Accepts users straight from untyped configuration. Problems with the
    /// mapping surface from [`build`](Self::build).
    pub fn raw_users(mut self, raw: Option<&Map<String, Value>>) -> Self {
        self.users = Some(CredentialStore::build(raw));
        self
    }

    pub fn password_encoder(mut self, encoder: Arc<dyn PasswordEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Validates the configuration and hands back a handler ready to serve.
    pub fn build(self) -> Result<AcceptUsersAuthenticationHandler, ConfigError> {
        let users = self.users.ok_or(ConfigError::MissingUsers)??;
        let encoder = self
            .encoder
            .unwrap_or_else(|| Arc::new(PlainTextPasswordEncoder));
        let name = self.name.unwrap_or_else(|| DEFAULT_NAME.to_string());

        info!(
            "{} ready with {} accepted user(s), {} password encoder",
            name,
            users.len(),
            encoder.name()
        );

        Ok(AcceptUsersAuthenticationHandler {
            users,
            encoder,
            name,
        })
    }
}

/// Handler holding a list of accepted users and their encoded passwords.
pub struct AcceptUsersAuthenticationHandler {
    users: CredentialStore,
    encoder: Arc<dyn PasswordEncoder>,
    name: String,
}

impl AcceptUsersAuthenticationHandler {
    pub fn builder() -> AcceptUsersAuthenticationHandlerBuilder {
        AcceptUsersAuthenticationHandlerBuilder::default()
    }

    /// Assembles a handler from loaded configuration.
    pub fn from_config(config: &HandlerConfig) -> Result<Self, ConfigError> {
        let mut builder = Self::builder()
            .raw_users(config.users.as_ref())
            .password_encoder(config.settings.encoder_kind()?.build());
        if let Some(name) = &config.settings.name {
            builder = builder.name(name.clone());
        }
        builder.build()
    }

    /// Checks a username/password pair. Unknown users and wrong passwords
    /// both come back as `false`.
    pub fn authenticate_username_password(&self, credentials: &UsernamePasswordCredentials) -> bool {
        let Some(stored) = self.users.lookup(&credentials.username) else {
            debug!("The user [{}] was not found in the map.", credentials.username);
            return false;
        };

        let encoded = self.encoder.encode(&credentials.password);
        constant_time_eq(stored.as_bytes(), encoded.as_bytes())
    }

    pub fn users(&self) -> &CredentialStore {
        &self.users
    }
}

impl AuthenticationHandler for AcceptUsersAuthenticationHandler {
    fn supports(&self, credentials: &Credentials) -> bool {
        matches!(credentials, Credentials::UsernamePassword(_))
    }

    fn authenticate(&self, credentials: &Credentials) -> bool {
        match credentials {
            Credentials::UsernamePassword(creds) => self.authenticate_username_password(creds),
            _ => {
                debug!("{} does not support the presented credentials", self.name);
                false
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for AcceptUsersAuthenticationHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcceptUsersAuthenticationHandler")
            .field("name", &self.name)
            .field("users", &self.users)
            .finish_non_exhaustive()
    }
}

/// Equal-length inputs are compared without an early exit.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
