//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use quill_admin::AdminSession;
use quill_gateway::ContentGateway;
use quill_render::PublicRenderer;
use quill_store::PageStore;

use crate::live_reload::LiveReloadManager;
use crate::middleware::auth::SessionRegistry;

/// Admin session over whichever gateway the server was started with.
pub(crate) type Admin = AdminSession<Arc<dyn ContentGateway>>;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Page store the public pages are rendered from.
    pub(crate) store: Arc<PageStore>,
    /// Admin session (shares `store`).
    pub(crate) admin: Arc<Admin>,
    /// Credentials of logged in admin clients.
    pub(crate) sessions: SessionRegistry,
    /// Public page renderer.
    pub(crate) renderer: PublicRenderer,
    /// Live reload manager (if enabled).
    pub(crate) live_reload: Option<LiveReloadManager>,
    /// Application version for cache invalidation.
    pub(crate) version: String,
}

impl AppState {
    /// Check if live reload is enabled.
    #[must_use]
    pub(crate) fn live_reload_enabled(&self) -> bool {
        self.live_reload.is_some()
    }
}
