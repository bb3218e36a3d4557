//! Authentication system
//!
//! Accept-users handler, its credential store and the password encoders it
//! compares with.

pub mod credentials;
pub mod encoder;
pub mod handler;
pub mod store;

pub use credentials::{Credentials, UsernamePasswordCredentials};
pub use encoder::{
    DefaultPasswordEncoder, DigestAlgorithm, EncoderKind, PasswordEncoder,
    PlainTextPasswordEncoder,
};
pub use handler::{
    AcceptUsersAuthenticationHandler, AcceptUsersAuthenticationHandlerBuilder,
    AuthenticationHandler,
};
pub use store::CredentialStore;
