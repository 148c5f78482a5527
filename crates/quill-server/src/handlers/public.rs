//! Public pages.
//!
//! Renders the selected page of the current snapshot as a full HTML
//! document. Unknown page ids fall back to the first page.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use quill_render::render_document;
use serde::Deserialize;

use crate::state::AppState;

/// Handle GET /.
pub(crate) async fn get_home(State(state): State<Arc<AppState>>) -> Html<String> {
    render_public(&state, None)
}

/// Handle GET /pages/{id}.
pub(crate) async fn get_page(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Html<String> {
    render_public(&state, Some(&id))
}

fn render_public(state: &AppState, selected: Option<&str>) -> Html<String> {
    let pages = state.store.load();
    let page = state.renderer.render(&pages, selected);
    Html(render_document(&page, state.live_reload_enabled()))
}

#[derive(Deserialize)]
pub(crate) struct PlaceholderQuery {
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
}

fn default_width() -> u32 {
    400
}

fn default_height() -> u32 {
    200
}

/// Handle GET /placeholder.svg.
///
/// Grey box of the requested size, used for images without a picture yet.
pub(crate) async fn get_placeholder(Query(query): Query<PlaceholderQuery>) -> impl IntoResponse {
    let width = query.width.clamp(1, 4096);
    let height = query.height.clamp(1, 4096);
    let svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\"><rect width=\"100%\" height=\"100%\" fill=\"#dbe0e5\"/></svg>"
    );
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        svg,
    )
}
