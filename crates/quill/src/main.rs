//! Quill CLI - content manager.
//!
//! Provides commands for:
//! - `serve`: Start the public page and admin API server
//! - `gateway login` / `gateway logout`: Manage the remote content API token
//! - `gateway sections`: List the remote section catalog

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{GatewayCommand, ServeArgs};
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Quill - content manager.
#[derive(Parser)]
#[command(name = "quill", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server.
    Serve(ServeArgs),
    /// Remote content API commands.
    #[command(subcommand)]
    Gateway(GatewayCommand),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Check if verbose flag is set for serve command
    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Serve(args) => {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            rt.block_on(args.execute(VERSION))
        }
        Commands::Gateway(cmd) => cmd.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_gateway_login() {
        let cli = Cli::try_parse_from([
            "quill", "gateway", "login", "--name", "admin", "--password", "secret",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Gateway(_)));
    }

    #[test]
    fn test_parse_serve_verbose() {
        let cli = Cli::try_parse_from(["quill", "serve", "-v", "--port", "8080"]).unwrap();

        assert!(matches!(&cli.command, Commands::Serve(args) if args.verbose));
    }
}
