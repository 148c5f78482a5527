//! `quill gateway` subcommand group.

mod login;
mod sections;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Subcommand;
use quill_admin::{AdminSession, TokenSlot};
use quill_config::Config;
use quill_gateway::HttpGateway;
use quill_store::{FsBackend, PageStore};

use login::{LoginArgs, LogoutArgs};
use sections::SectionsArgs;

use crate::error::CliError;

/// Remote content API commands.
#[derive(Subcommand)]
pub(crate) enum GatewayCommand {
    /// Log in and keep the token for the server.
    Login(LoginArgs),
    /// Forget the kept token.
    Logout(LogoutArgs),
    /// List remote sections with their content.
    Sections(SectionsArgs),
}

impl GatewayCommand {
    /// Execute the gateway subcommand.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        match self {
            Self::Login(args) => args.execute(),
            Self::Logout(args) => args.execute(),
            Self::Sections(args) => args.execute(),
        }
    }
}

/// Admin session wired the same way `quill serve` wires it.
fn open_session(config_path: Option<&Path>) -> Result<AdminSession<HttpGateway>, CliError> {
    let config = Config::load(config_path, None)?;
    let store = Arc::new(PageStore::new(Arc::new(FsBackend::new(
        config.store_resolved.snapshot_path.clone(),
    ))));
    let gateway = HttpGateway::new(
        &config.gateway_resolved.base_url,
        config.gateway_resolved.timeout(),
    );
    Ok(AdminSession::new(
        store,
        gateway,
        TokenSlot::file(config.gateway_resolved.token_path.clone()),
    ))
}

/// Shared `--config` argument.
#[derive(clap::Args)]
pub(crate) struct ConfigArg {
    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}
