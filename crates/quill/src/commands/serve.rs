//! `quill serve` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use quill_config::{CliSettings, Config};
use quill_server::{run_server, server_config_from_quill_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Page snapshot file (overrides config).
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Remote content API base URL (overrides config).
    #[arg(long, env = "QUILL_GATEWAY_URL")]
    gateway_url: Option<String>,

    /// Enable verbose output (request and store logs).
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable live reload (default: enabled).
    #[arg(long)]
    live_reload: Option<bool>,

    /// Disable live reload.
    #[arg(long, conflicts_with = "live_reload")]
    no_live_reload: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let live_reload_enabled = self.resolve_live_reload_enabled();

        // Build CLI settings from args
        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            snapshot_path: self.snapshot,
            gateway_url: self.gateway_url,
            live_reload_enabled,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if let Some(state_dir) = config.store_resolved.snapshot_path.parent() {
            ensure_state_dir(state_dir)?;
        }

        // Print startup info
        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Snapshot: {}",
            config.store_resolved.snapshot_path.display()
        ));
        output.info(&format!("Content API: {}", config.gateway_resolved.base_url));

        if config.live_reload.enabled {
            output.info("Live reload: enabled");
        } else {
            output.info("Live reload: disabled");
        }

        let server_config = server_config_from_quill_config(&config, version.to_owned());
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }

    /// Resolve `live_reload_enabled` from --live-reload/--no-live-reload flags.
    fn resolve_live_reload_enabled(&self) -> Option<bool> {
        self.no_live_reload.then_some(false).or(self.live_reload)
    }
}

/// Ensure the snapshot directory exists. A `.quill/` state directory also
/// gets a `.gitignore`, since it holds the login token.
fn ensure_state_dir(dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| CliError::Server(format!("Failed to create state directory: {e}")))?;

    if dir.file_name().is_some_and(|name| name == ".quill") {
        let gitignore_path = dir.join(".gitignore");
        if !gitignore_path.exists() {
            let _ = std::fs::write(&gitignore_path, "# Automatically created by quill\ntoken\n");
        }
    }

    Ok(())
}
