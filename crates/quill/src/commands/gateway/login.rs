//! `quill gateway login` and `quill gateway logout`.

use clap::Args;

use super::{ConfigArg, open_session};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the gateway login command.
#[derive(Args)]
pub(crate) struct LoginArgs {
    /// Account name.
    #[arg(short, long, env = "QUILL_USER")]
    name: String,

    /// Account password.
    #[arg(short, long, env = "QUILL_PASSWORD", hide_env_values = true)]
    password: String,

    #[command(flatten)]
    config: ConfigArg,
}

impl LoginArgs {
    /// Execute the login command.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the token cannot
    /// be stored.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let session = open_session(self.config.config.as_deref())?;

        session.login(&self.name, &self.password)?;

        output.success(&format!("Logged in as {}", self.name));
        Ok(())
    }
}

/// Arguments for the gateway logout command.
#[derive(Args)]
pub(crate) struct LogoutArgs {
    #[command(flatten)]
    config: ConfigArg,
}

impl LogoutArgs {
    /// Execute the logout command.
    ///
    /// # Errors
    ///
    /// Returns an error if the token file cannot be removed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let session = open_session(self.config.config.as_deref())?;

        if !session.is_logged_in() {
            output.info("Not logged in");
            return Ok(());
        }
        session.logout()?;

        output.success("Logged out");
        Ok(())
    }
}
