pub mod auth;
pub mod config;
pub mod error;
pub mod utils;

pub use auth::{AcceptUsersAuthenticationHandler, AuthenticationHandler};
pub use error::ConfigError;
