//! Configuration management for the accept-users handler
//!
//! Reads the accepted users and the encoder selection from a TOML file with
//! environment overrides. The users table is kept untyped so that bad values
//! can be reported per user when the handler is assembled.

use config::{Config, Environment, File, FileFormat, Map, Value};
use serde::Deserialize;

use crate::auth::encoder::EncoderKind;
use crate::error::ConfigError;

/// Default location of the configuration file, without extension.
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Prefix for environment overrides, e.g. `ACCEPT_USERS__PASSWORD_ENCODER`.
pub const ENV_PREFIX: &str = "ACCEPT_USERS";

/// Typed handler settings
#[derive(Debug, Deserialize, Clone, Default)]
pub struct HandlerSettings {
    /// Name reported in diagnostics
    pub name: Option<String>,

    /// `plain` or a digest name such as `SHA-256`
    pub password_encoder: Option<String>,
}

/// Complete handler configuration
#[derive(Debug, Clone, Default)]
pub struct HandlerConfig {
    pub settings: HandlerSettings,

    /// Username to encoded password, exactly as the sources provided it
    pub users: Option<Map<String, Value>>,
}

impl HandlerConfig {
    /// Load configuration from `<path>.toml` with environment overrides.
    ///
    /// The environment may override the typed settings only. Accepted users
    /// come from the file, since environment keys are case-folded and
    /// usernames are not.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let file = Config::builder().add_source(File::with_name(path)).build()?;
        let users = users_table(&file)?;

        let env = Config::builder().add_source(env_source()).build()?;
        match env.get_table("users") {
            Ok(table) => {
                let mut names: Vec<String> = table.into_keys().collect();
                names.sort_unstable();
                return Err(ConfigError::UsersFromEnvironment(names.join(", ")));
            }
            Err(config::ConfigError::NotFound(_)) => {}
            Err(_) => return Err(ConfigError::UsersFromEnvironment("users".into())),
        }

        let settings = Config::builder()
            .add_source(File::with_name(path))
            .add_source(env_source())
            .build()?;

        Ok(Self {
            settings: settings.try_deserialize()?,
            users,
        })
    }

    /// Load configuration from an in-memory TOML document.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?;
        Self::from_settings(settings)
    }

    fn from_settings(settings: Config) -> Result<Self, ConfigError> {
        let users = users_table(&settings)?;
        let typed: HandlerSettings = settings.try_deserialize()?;

        Ok(Self {
            settings: typed,
            users,
        })
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator("__")
}

fn users_table(settings: &Config) -> Result<Option<Map<String, Value>>, ConfigError> {
    match settings.get_table("users") {
        Ok(table) => Ok(Some(table)),
        Err(config::ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl HandlerSettings {
    /// Parse the configured encoder, defaulting to plain text.
    pub fn encoder_kind(&self) -> Result<EncoderKind, ConfigError> {
        match &self.password_encoder {
            Some(name) => name.parse(),
            None => Ok(EncoderKind::Plain),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::encoder::DigestAlgorithm;

    #[test]
    fn reads_settings_and_users() {
        let config = HandlerConfig::from_toml(
            r#"
            name = "whitelist"
            password_encoder = "SHA-256"

            [users]
            alice = "abc"
            bob = "def"
            "#,
        )
        .unwrap();

        assert_eq!(config.settings.name.as_deref(), Some("whitelist"));
        assert_eq!(
            config.settings.encoder_kind().unwrap(),
            EncoderKind::Digest(DigestAlgorithm::Sha256)
        );
        assert_eq!(config.users.as_ref().map(|u| u.len()), Some(2));
    }

    #[test]
    fn missing_users_table_is_none() {
        let config = HandlerConfig::from_toml(r#"name = "empty""#).unwrap();
        assert!(config.users.is_none());
        assert_eq!(config.settings.encoder_kind().unwrap(), EncoderKind::Plain);
    }

    #[test]
    fn unknown_encoder_is_reported() {
        let config = HandlerConfig::from_toml(
            r#"
            password_encoder = "rot13"
            [users]
            alice = "x"
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.settings.encoder_kind(),
            Err(ConfigError::UnknownEncoder(_))
        ));
    }

    #[test]
    fn empty_encoder_name_is_not_plain_text() {
        let config = HandlerConfig::from_toml(r#"password_encoder = """#).unwrap();
        assert!(matches!(
            config.settings.encoder_kind(),
            Err(ConfigError::UnknownEncoder(_))
        ));
    }

    // The only test in this binary that touches ACCEPT_USERS__* variables.
    #[test]
    fn environment_overrides_settings_but_not_users() {
        let path = std::env::temp_dir().join(format!("accept-users-env-{}.toml", std::process::id()));
        std::fs::write(&path, "[users]\nAlice = \"x\"\n").unwrap();
        let path_str = path.to_str().unwrap().to_string();

        unsafe { std::env::set_var("ACCEPT_USERS__PASSWORD_ENCODER", "SHA-512") };
        let config = HandlerConfig::load(&path_str).unwrap();
        assert_eq!(
            config.settings.encoder_kind().unwrap(),
            EncoderKind::Digest(DigestAlgorithm::Sha512)
        );
        let users = config.users.unwrap();
        assert_eq!(users.len(), 1);
        assert!(users.contains_key("Alice"));

        unsafe { std::env::set_var("ACCEPT_USERS__USERS__Bob", "pw") };
        let result = HandlerConfig::load(&path_str);

        unsafe {
            std::env::remove_var("ACCEPT_USERS__USERS__Bob");
            std::env::remove_var("ACCEPT_USERS__PASSWORD_ENCODER");
        }
        std::fs::remove_file(&path).unwrap();

        match result {
            Err(err @ ConfigError::UsersFromEnvironment(_)) => {
                assert!(err.to_string().to_lowercase().contains("bob"))
            }
            other => panic!("expected UsersFromEnvironment, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_a_source_error() {
        let result = HandlerConfig::load("definitely/not/here/config");
        assert!(matches!(result, Err(ConfigError::Source(_))));
    }
}
