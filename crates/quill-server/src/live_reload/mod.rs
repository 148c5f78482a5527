//! Live reload for public pages.
//!
//! Forwards page store changes, both saves through this server and writes
//! by other processes to the same snapshot, to connected WebSocket clients.

mod manager;
mod websocket;

pub(crate) use manager::{LiveReloadManager, ReloadEvent};
pub(crate) use websocket::ws_handler;
