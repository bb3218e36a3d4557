//! Input validation utilities
//!
//! Parses credential lines read by the command line front end.

use crate::auth::UsernamePasswordCredentials;

/// Maximum accepted line length, in bytes.
pub const MAX_LINE_LENGTH: usize = 1024;

/// Validate that input is not empty and doesn't contain dangerous characters
pub fn is_valid_input(input: &str) -> bool {
    !input.trim().is_empty() && input.len() <= MAX_LINE_LENGTH && !input.contains('\0')
}

/// Split a `username password` line. The password is everything after the
/// first run of whitespace, so it may itself contain spaces.
pub fn parse_credential_line(line: &str) -> Option<UsernamePasswordCredentials> {
    let line = line.trim_end_matches(['\r', '\n']);
    if !is_valid_input(line) {
        return None;
    }

    let line = line.trim_start();
    let (username, password) = line.split_once(char::is_whitespace)?;
    let password = password.trim_start();
    if password.is_empty() {
        return None;
    }
    Some(UsernamePasswordCredentials::new(username, password))
}
