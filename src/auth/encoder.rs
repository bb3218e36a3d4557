//! Password encoders
//!
//! Encoders turn a plaintext password into the representation kept in the
//! credential store. Handlers only ever compare encoded forms.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::error::ConfigError;

/// Deterministic plaintext to encoded-form mapping.
///
/// Equal inputs must always produce equal outputs for a given encoder
/// configuration. Implementations are shared across threads, so they must not
/// rely on interior mutability for correctness.
pub trait PasswordEncoder: Send + Sync {
    fn encode(&self, password: &str) -> String;

    /// Short label for diagnostics.
    fn name(&self) -> String;
}

/// Returns the password unchanged. Used when no encoder is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextPasswordEncoder;

impl PasswordEncoder for PlainTextPasswordEncoder {
    fn encode(&self, password: &str) -> String {
        password.to_string()
    }

    fn name(&self) -> String {
        "plain".to_string()
    }
}

/// Digest algorithms understood by [`DefaultPasswordEncoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DigestAlgorithm::Sha224 => "SHA-224",
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha384 => "SHA-384",
            DigestAlgorithm::Sha512 => "SHA-512",
        };
        f.write_str(name)
    }
}

impl FromStr for DigestAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let bits = upper
            .strip_prefix("SHA")
            .map(|rest| rest.strip_prefix(['-', '_']).unwrap_or(rest));

        match bits {
            Some("224") => Ok(DigestAlgorithm::Sha224),
            Some("256") => Ok(DigestAlgorithm::Sha256),
            Some("384") => Ok(DigestAlgorithm::Sha384),
            Some("512") => Ok(DigestAlgorithm::Sha512),
            _ => Err(ConfigError::UnknownEncoder(s.to_string())),
        }
    }
}

/// Hashes the UTF-8 bytes of the password and renders the digest as
/// lowercase hex.
#[derive(Debug, Clone, Copy)]
pub struct DefaultPasswordEncoder {
    algorithm: DigestAlgorithm,
}

impl DefaultPasswordEncoder {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }
}

impl PasswordEncoder for DefaultPasswordEncoder {
    fn encode(&self, password: &str) -> String {
        let bytes = password.as_bytes();
        match self.algorithm {
            DigestAlgorithm::Sha224 => format!("{:x}", Sha224::digest(bytes)),
            DigestAlgorithm::Sha256 => format!("{:x}", Sha256::digest(bytes)),
            DigestAlgorithm::Sha384 => format!("{:x}", Sha384::digest(bytes)),
            DigestAlgorithm::Sha512 => format!("{:x}", Sha512::digest(bytes)),
        }
    }

    fn name(&self) -> String {
        self.algorithm.to_string()
    }
}

/// Encoder selection as it appears in configuration: `plain` or a digest name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncoderKind {
    #[default]
    Plain,
    Digest(DigestAlgorithm),
}

impl EncoderKind {
    pub fn build(self) -> Arc<dyn PasswordEncoder> {
        match self {
            EncoderKind::Plain => Arc::new(PlainTextPasswordEncoder),
            EncoderKind::Digest(algorithm) => Arc::new(DefaultPasswordEncoder::new(algorithm)),
        }
    }
}

impl fmt::Display for EncoderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncoderKind::Plain => f.write_str("plain"),
            EncoderKind::Digest(algorithm) => fmt::Display::fmt(algorithm, f),
        }
    }
}

impl FromStr for EncoderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "plaintext" | "none" => Ok(EncoderKind::Plain),
            _ => s.parse().map(EncoderKind::Digest),
        }
    }
}
