//! Credential store
//!
//! Immutable username to encoded-password mapping. The store owns its own
//! snapshot of whatever mapping it was built from and exposes no way to change
//! it afterwards.

use std::collections::HashMap;
use std::fmt;

use config::{Map, Value, ValueKind};

use crate::error::ConfigError;

pub struct CredentialStore {
    users: HashMap<String, String>,
}

impl CredentialStore {
    /// Builds a store from untyped configuration values.
    ///
    /// Every value must be a string. A missing mapping, a null password or a
    /// non-string password fails with a [`ConfigError`] naming the mapping or
    /// the offending user.
    pub fn build(raw: Option<&Map<String, Value>>) -> Result<Self, ConfigError> {
        let raw = raw.ok_or(ConfigError::MissingUsers)?;

        let mut users = HashMap::with_capacity(raw.len());
        for (username, value) in raw {
            let password = match &value.kind {
                ValueKind::String(password) => password.clone(),
                ValueKind::Nil => return Err(ConfigError::NullPassword(username.clone())),
                _ => return Err(ConfigError::PasswordNotString(username.clone())),
            };
            users.insert(username.clone(), password);
        }

        Ok(Self { users })
    }

    /// Builds a store from already-typed, already-encoded passwords.
    pub fn from_encoded<I, U, P>(users: I) -> Self
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: Into<String>,
    {
        Self {
            users: users
                .into_iter()
                .map(|(u, p)| (u.into(), p.into()))
                .collect(),
        }
    }

    /// Exact, case-sensitive lookup of a user's encoded password.
    pub fn lookup(&self, username: &str) -> Option<&str> {
        self.users.get(username).map(String::as_str)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

// Usernames only; encoded passwords stay out of logs.
impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.users.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("CredentialStore").field("users", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(entries: &[(&str, Value)]) -> Map<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn builds_from_string_values() {
        let map = raw(&[("alice", Value::from("a1")), ("bob", Value::from("b2"))]);
        let store = CredentialStore::build(Some(&map)).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup("alice"), Some("a1"));
        assert_eq!(store.lookup("bob"), Some("b2"));
        assert_eq!(store.lookup("carol"), None);
    }

    #[test]
    fn missing_mapping_is_rejected() {
        assert!(matches!(
            CredentialStore::build(None),
            Err(ConfigError::MissingUsers)
        ));
    }

    #[test]
    fn null_password_names_the_user() {
        let map = raw(&[("alice", Value::new(None, ValueKind::Nil))]);
        match CredentialStore::build(Some(&map)) {
            Err(err @ ConfigError::NullPassword(_)) => assert!(err.to_string().contains("alice")),
            other => panic!("expected NullPassword, got {:?}", other),
        }
    }

    #[test]
    fn non_string_password_names_the_user() {
        for value in [Value::from(42i64), Value::from(true), Value::from(1.5f64)] {
            let map = raw(&[("carol", value)]);
            match CredentialStore::build(Some(&map)) {
                Err(ConfigError::PasswordNotString(user)) => assert_eq!(user, "carol"),
                other => panic!("expected PasswordNotString, got {:?}", other),
            }
        }
    }

    #[test]
    fn later_changes_to_the_source_do_not_leak_in() {
        let mut map = raw(&[("alice", Value::from("a1"))]);
        let store = CredentialStore::build(Some(&map)).unwrap();

        map.insert("alice".into(), Value::from("changed"));
        map.insert("mallory".into(), Value::from("m1"));

        assert_eq!(store.lookup("alice"), Some("a1"));
        assert!(!store.contains("mallory"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let store = CredentialStore::from_encoded([("Alice", "a1")]);
        assert_eq!(store.lookup("Alice"), Some("a1"));
        assert_eq!(store.lookup("alice"), None);
        assert_eq!(store.lookup("ALICE"), None);
    }

    #[test]
    fn empty_mapping_builds_an_empty_store() {
        let store = CredentialStore::build(Some(&Map::new())).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn debug_output_lists_users_only() {
        let store = CredentialStore::from_encoded([("bob", "b2"), ("alice", "a1")]);
        let rendered = format!("{:?}", store);
        assert!(rendered.contains("alice") && rendered.contains("bob"));
        assert!(!rendered.contains("a1") && !rendered.contains("b2"));
    }
}
