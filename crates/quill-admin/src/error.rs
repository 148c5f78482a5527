//! Admin error types.

use std::path::PathBuf;

use quill_editor::EditError;
use quill_gateway::GatewayError;
use quill_store::StoreError;

/// Error from an admin operation.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// The operation needs a login token.
    #[error("not logged in")]
    NotAuthenticated,

    /// Remote content gateway call failed.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// The edit could not be applied.
    #[error(transparent)]
    Edit(#[from] EditError),

    /// The page store could not persist the change.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The login token file could not be read or written.
    #[error("token file {}: {source}", .path.display())]
    TokenIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
