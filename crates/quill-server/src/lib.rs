//! HTTP server for Quill.
//!
//! This crate provides a native Rust HTTP server using axum, serving:
//! - the public page (`GET /`, `GET /pages/{id}`) rendered from the page store
//! - a read-only JSON API over the persisted snapshot (`/api/pages`)
//! - the admin JSON API (`/api/admin/*`) backed by an [`AdminSession`]
//! - a WebSocket endpoint for live reload of public pages
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use quill_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         snapshot_path: PathBuf::from(".quill/pages.json"),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum server (quill-server)
//!                        │
//!                        ├─► Public pages ──► PublicRenderer ──► PageStore::load
//!                        │
//!                        ├─► Admin API ──spawn_blocking──► AdminSession
//!                        │                                    ├─► PageStore::update
//!                        │                                    └─► ContentGateway (ureq)
//!                        │
//!                        └─► WebSocket (LiveReloadManager)
//!                                └─► store subscribers + external slot watch
//! ```
//!
//! [`AdminSession`]: quill_admin::AdminSession

mod app;
mod error;
mod handlers;
mod live_reload;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use quill_admin::{AdminSession, TokenSlot};
use quill_gateway::{ContentGateway, DEFAULT_BASE_URL, HttpGateway};
use quill_render::PublicRenderer;
use quill_store::{FsBackend, PageStore};
use state::AppState;
use tokio::sync::broadcast;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// JSON snapshot holding all pages.
    pub snapshot_path: PathBuf,
    /// Remote content API base URL.
    pub gateway_url: String,
    /// Timeout of each remote call.
    pub gateway_timeout: Duration,
    /// File keeping the admin login token between runs.
    pub token_path: PathBuf,
    /// Enable live reload.
    pub live_reload_enabled: bool,
    /// Application version (part of page ETags).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
            snapshot_path: PathBuf::from(".quill/pages.json"),
            gateway_url: DEFAULT_BASE_URL.to_owned(),
            gateway_timeout: Duration::from_secs(30),
            token_path: PathBuf::from(".quill/token"),
            live_reload_enabled: false,
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Create shared page store over the snapshot file
    let store = Arc::new(PageStore::new(Arc::new(FsBackend::new(
        config.snapshot_path.clone(),
    ))));

    let gateway: Arc<dyn ContentGateway> = Arc::new(HttpGateway::new(
        &config.gateway_url,
        config.gateway_timeout,
    ));
    let admin = AdminSession::new(
        Arc::clone(&store),
        gateway,
        TokenSlot::file(config.token_path.clone()),
    );

    // Create live reload manager if enabled
    let live_reload = if config.live_reload_enabled {
        let (tx, _rx) = broadcast::channel::<live_reload::ReloadEvent>(100);
        let mut manager = live_reload::LiveReloadManager::new(tx);
        manager.start(&store)?;
        Some(manager)
    } else {
        None
    };

    // Create app state
    let state = Arc::new(AppState {
        store,
        admin: Arc::new(admin),
        sessions: middleware::auth::SessionRegistry::default(),
        renderer: PublicRenderer::new(),
        live_reload,
        version: config.version.clone(),
    });

    // Create router
    let app = app::create_router(state);

    // Bind and run server
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        snapshot = %config.snapshot_path.display(),
        gateway = %config.gateway_url,
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Quill config.
///
/// # Arguments
///
/// * `config` - Quill configuration
/// * `version` - Application version
#[must_use]
pub fn server_config_from_quill_config(config: &quill_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        snapshot_path: config.store_resolved.snapshot_path.clone(),
        gateway_url: config.gateway_resolved.base_url.clone(),
        gateway_timeout: config.gateway_resolved.timeout(),
        token_path: config.gateway_resolved.token_path.clone(),
        live_reload_enabled: config.live_reload.enabled,
        version,
    }
}
