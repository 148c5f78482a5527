//! CLI error types.

use quill_admin::AdminError;
use quill_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Admin(#[from] AdminError),

    #[error("{0}")]
    Server(String),
}
