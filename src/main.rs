//! accept-users - Entry Point
//!
//! Assembles an accept-users handler from configuration and checks
//! `username password` lines read from standard input.

use std::process;

use log::{debug, info};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use accept_users_auth::auth::{AuthenticationHandler, Credentials};
use accept_users_auth::config::{DEFAULT_CONFIG_PATH, HandlerConfig};
use accept_users_auth::error::handlers::{error_to_exit_code, handle_error};
use accept_users_auth::utils::{logging, validation};
use accept_users_auth::{AcceptUsersAuthenticationHandler, ConfigError};

fn assemble(path: &str) -> Result<AcceptUsersAuthenticationHandler, ConfigError> {
    let config = HandlerConfig::load(path)?;
    AcceptUsersAuthenticationHandler::from_config(&config)
}

#[tokio::main]
async fn main() -> io::Result<()> {
    logging::setup_logging();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let handler = match assemble(&path) {
        Ok(handler) => handler,
        Err(err) => {
            handle_error(&err);
            process::exit(error_to_exit_code(&err));
        }
    };

    info!("Reading credentials from stdin...");

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    while let Some(line) = lines.next_line().await? {
        let accepted = match validation::parse_credential_line(&line) {
            Some(creds) => handler.authenticate(&Credentials::from(creds)),
            None => {
                debug!("Ignoring malformed credential line");
                false
            }
        };

        let verdict: &[u8] = if accepted { b"accepted\n" } else { b"rejected\n" };
        stdout.write_all(verdict).await?;
        stdout.flush().await?;
    }

    Ok(())
}
