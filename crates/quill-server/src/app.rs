//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, admin};
use crate::live_reload;
use crate::middleware::{auth, security};
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    // Public pages
    let public_routes = Router::new()
        .route("/", get(handlers::public::get_home))
        .route("/pages/{id}", get(handlers::public::get_page))
        .route("/placeholder.svg", get(handlers::public::get_placeholder));

    // Read-only snapshot API
    let api_routes = Router::new()
        .route("/api/pages", get(handlers::pages::get_pages))
        .route("/api/pages/{id}", get(handlers::pages::get_page));

    // Login state, reachable without a credential
    let session_routes = Router::new()
        .route("/api/admin/login", post(admin::session::login))
        .route("/api/admin/session", get(admin::session::get_session));

    let admin_routes = Router::new()
        .route("/api/admin/logout", post(admin::session::logout))
        .route("/api/admin/pages", post(admin::pages::create_page))
        .route("/api/admin/pages/{id}", delete(admin::pages::delete_page))
        .route("/api/admin/pages/{id}/fields", put(admin::pages::edit_field))
        .route(
            "/api/admin/pages/{id}/description",
            delete(admin::pages::clear_description),
        )
        .route("/api/admin/pages/{id}/sections", post(admin::pages::add_section))
        .route(
            "/api/admin/pages/{id}/sections/{section_id}",
            delete(admin::pages::delete_section),
        )
        .route(
            "/api/admin/pages/{id}/images",
            post(admin::images::add_image).delete(admin::images::delete_image),
        )
        .route(
            "/api/admin/remote/sections",
            get(admin::catalog::list_sections).post(admin::catalog::create_section),
        )
        .route(
            "/api/admin/remote/sections/{id}",
            put(admin::catalog::update_section).delete(admin::catalog::delete_section),
        )
        .route(
            "/api/admin/remote/sections/{id}/content",
            get(admin::catalog::list_content).post(admin::catalog::create_content),
        )
        .route(
            "/api/admin/remote/content/{id}",
            put(admin::catalog::update_content).delete(admin::catalog::delete_content),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::require_session,
        ));

    let mut router = Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .merge(session_routes)
        .merge(admin_routes);

    // WebSocket for live reload
    if state.live_reload_enabled() {
        router = router.route("/ws/live-reload", get(live_reload::ws_handler));
    }

    // Add security headers middleware
    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use pretty_assertions::assert_eq;
    use quill_gateway::GatewayCall;
    use quill_model::{DEFAULT_PAGE_ID, placeholder_image};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::state::tests::{logged_in_state, test_state};

    async fn send(state: &Arc<AppState>, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = create_router(Arc::clone(state)).oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    async fn send_json(
        state: &Arc<AppState>,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        send_json_as(state, None, method, uri, body).await
    }

    async fn send_json_as(
        state: &Arc<AppState>,
        credential: Option<&str>,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(credential) = credential {
            request = request.header(header::AUTHORIZATION, format!("Bearer {credential}"));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();
        let (status, bytes) = send(state, request).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_home_renders_default_page() {
        let (state, _) = test_state();

        let (status, body) = send(&state, get("/")).await;

        let html = String::from_utf8(body).unwrap();
        assert_eq!(status, StatusCode::OK);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Welcome to Your Content Hub"));
        assert!(!html.contains("/ws/live-reload"));
    }

    #[tokio::test]
    async fn test_security_headers() {
        let (state, _) = test_state();
        let response = create_router(state).oneshot(get("/")).await.unwrap();

        let headers = response.headers();
        assert_eq!(headers["x-frame-options"], "DENY");
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert!(headers.contains_key("content-security-policy"));
    }

    #[tokio::test]
    async fn test_placeholder_svg() {
        let (state, _) = test_state();
        let response = create_router(state)
            .oneshot(get("/placeholder.svg?height=200&width=400"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
    }

    #[tokio::test]
    async fn test_api_pages_etag() {
        let (state, _) = test_state();
        let response = create_router(Arc::clone(&state))
            .oneshot(get("/api/pages"))
            .await
            .unwrap();
        let etag = response.headers()[header::ETAG].clone();

        let conditional = Request::builder()
            .uri("/api/pages")
            .header(header::IF_NONE_MATCH, etag)
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&state, conditional).await;

        assert_eq!(status, StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_api_page_not_found() {
        let (state, _) = test_state();

        let (status, body) = send_json(&state, Method::GET, "/api/pages/ghost", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["id"], "ghost");
    }

    #[tokio::test]
    async fn test_admin_requires_login() {
        let (state, _) = test_state();

        let (status, _) = send_json(
            &state,
            Method::POST,
            "/api/admin/pages",
            Some(json!({"name": "About"})),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_flow() {
        let (state, _) = test_state();

        let (status, _) = send_json(
            &state,
            Method::POST,
            "/api/admin/login",
            Some(json!({"name": "admin", "password": "nope"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, body) = send_json(
            &state,
            Method::POST,
            "/api/admin/login",
            Some(json!({"name": "admin", "password": "secret"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["loggedIn"], true);
        let credential = body["token"].as_str().unwrap().to_owned();

        let (_, session) =
            send_json_as(&state, Some(&credential), Method::GET, "/api/admin/session", None).await;
        assert_eq!(session["loggedIn"], true);
        let (_, anonymous) = send_json(&state, Method::GET, "/api/admin/session", None).await;
        assert_eq!(anonymous["loggedIn"], false);

        let (status, _) =
            send_json_as(&state, Some(&credential), Method::POST, "/api/admin/logout", None).await;
        assert_eq!(status, StatusCode::OK);
        let (_, session) =
            send_json_as(&state, Some(&credential), Method::GET, "/api/admin/session", None).await;
        assert_eq!(session["loggedIn"], false);
        assert!(!state.admin.is_logged_in());
    }

    #[tokio::test]
    async fn test_other_client_login_grants_nothing() {
        let (state, _, credential) = logged_in_state();
        let uri = format!("/api/admin/pages/{DEFAULT_PAGE_ID}?confirm=true");

        let (status, _) = send_json(&state, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = send_json_as(&state, Some("forged"), Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(state.store.load().contains(DEFAULT_PAGE_ID));

        let (status, _) = send_json_as(&state, Some(&credential), Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(state.store.load().is_empty());
    }

    #[tokio::test]
    async fn test_logout_keeps_other_clients_logged_in() {
        let (state, _, first) = logged_in_state();
        let second = state.sessions.issue();

        send_json_as(&state, Some(&first), Method::POST, "/api/admin/logout", None).await;

        let (status, _) = send_json_as(
            &state,
            Some(&first),
            Method::POST,
            "/api/admin/pages",
            Some(json!({"name": "About"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, body) = send_json_as(
            &state,
            Some(&second),
            Method::POST,
            "/api/admin/pages",
            Some(json!({"name": "About"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "applied");
    }

    #[tokio::test]
    async fn test_create_page_and_render_tab() {
        let (state, _, credential) = logged_in_state();

        let (status, body) = send_json_as(
            &state,
            Some(&credential),
            Method::POST,
            "/api/admin/pages",
            Some(json!({"name": "About Us"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "applied");
        let id = body["result"].as_str().unwrap().to_owned();

        let (_, html) = send(&state, get(&format!("/pages/{id}"))).await;
        let html = String::from_utf8(html).unwrap();
        assert!(html.contains("page-tabs"));
        assert!(html.contains(&format!("href=\"/pages/{id}\"")));
    }

    #[tokio::test]
    async fn test_blank_page_name_is_skipped() {
        let (state, _, credential) = logged_in_state();

        let (status, body) = send_json_as(
            &state,
            Some(&credential),
            Method::POST,
            "/api/admin/pages",
            Some(json!({"name": "  "})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "skipped"}));
    }

    #[tokio::test]
    async fn test_edit_field_updates_public_page() {
        let (state, _, credential) = logged_in_state();

        let (status, body) = send_json_as(
            &state,
            Some(&credential),
            Method::PUT,
            &format!("/api/admin/pages/{DEFAULT_PAGE_ID}/fields"),
            Some(json!({"path": "featured.title", "value": "<Fresh>"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["featuredSection"]["title"], "<Fresh>");

        let (_, html) = send(&state, get("/")).await;
        assert!(String::from_utf8(html).unwrap().contains("&lt;Fresh&gt;"));
    }

    #[tokio::test]
    async fn test_edit_field_unknown_section() {
        let (state, _, credential) = logged_in_state();

        let (status, _) = send_json_as(
            &state,
            Some(&credential),
            Method::PUT,
            &format!("/api/admin/pages/{DEFAULT_PAGE_ID}/fields"),
            Some(json!({"path": "sections.99.title", "value": "x"})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_page_needs_confirmation() {
        let (state, _, credential) = logged_in_state();
        let uri = format!("/api/admin/pages/{DEFAULT_PAGE_ID}");

        let (_, declined) =
            send_json_as(&state, Some(&credential), Method::DELETE, &uri, None).await;
        assert_eq!(declined["status"], "skipped");
        let (status, other) = send_json_as(
            &state,
            Some(&credential),
            Method::DELETE,
            &format!("{uri}?confirm=yes"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(other["status"], "skipped");
        assert!(state.store.load().contains(DEFAULT_PAGE_ID));

        let (_, confirmed) = send_json_as(
            &state,
            Some(&credential),
            Method::DELETE,
            &format!("{uri}?confirm=true"),
            None,
        )
        .await;
        assert_eq!(confirmed["status"], "applied");
        assert!(state.store.load().is_empty());
    }

    #[tokio::test]
    async fn test_add_and_delete_section() {
        let (state, _, credential) = logged_in_state();
        let base = format!("/api/admin/pages/{DEFAULT_PAGE_ID}/sections");

        let (_, added) =
            send_json_as(&state, Some(&credential), Method::POST, &base, Some(json!({}))).await;
        let sections = added["result"]["contentSections"].as_array().unwrap();
        let new_id = sections.last().unwrap()["id"].as_str().unwrap().to_owned();

        let (status, _) = send_json_as(
            &state,
            Some(&credential),
            Method::DELETE,
            &format!("{base}/{new_id}?confirm=true"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let page = state.store.load().get(DEFAULT_PAGE_ID).unwrap().clone();
        let ids: Vec<_> = page.content_sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_upload_then_delete_image() {
        let (state, mock, credential) = logged_in_state();
        let uri = format!("/api/admin/pages/{DEFAULT_PAGE_ID}/images");

        let (status, body) = send_json_as(
            &state,
            Some(&credential),
            Method::POST,
            &uri,
            Some(json!({
                "target": "sections.1",
                "replace": true,
                "alt": "Hero",
                "upload": {"filename": "hero.png", "contentType": "image/png", "data": "cG5n"}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let remote_id = body["result"]["contentSections"][0]["images"][0]["id"]
            .as_str()
            .unwrap()
            .to_owned();
        assert!(mock.has_image(&remote_id));

        let (status, _) = send_json_as(
            &state,
            Some(&credential),
            Method::DELETE,
            &format!("{uri}?target=sections.1&index=0&confirm=true"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            mock.calls().last(),
            Some(&GatewayCall::DeleteImage { remote_id })
        );
        let page = state.store.load().get(DEFAULT_PAGE_ID).unwrap().clone();
        assert_eq!(page.content_sections[0].images, vec![placeholder_image()]);
    }

    #[tokio::test]
    async fn test_gateway_failure_is_bad_gateway() {
        let (state, mock, credential) = logged_in_state();
        mock.set_failing(true);
        let before = state.store.load();

        let (status, _) = send_json_as(
            &state,
            Some(&credential),
            Method::POST,
            &format!("/api/admin/pages/{DEFAULT_PAGE_ID}/images"),
            Some(json!({
                "target": "featured",
                "upload": {"filename": "a.png", "contentType": "image/png", "data": "cG5n"}
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(state.store.load(), before);
    }

    #[tokio::test]
    async fn test_invalid_upload_data() {
        let (state, mock, credential) = logged_in_state();
        let calls = mock.calls().len();

        let (status, _) = send_json_as(
            &state,
            Some(&credential),
            Method::POST,
            &format!("/api/admin/pages/{DEFAULT_PAGE_ID}/images"),
            Some(json!({
                "target": "featured",
                "upload": {"filename": "a.png", "contentType": "image/png", "data": "%%%"}
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(mock.calls().len(), calls);
    }

    #[tokio::test]
    async fn test_remote_catalog() {
        let (state, _, credential) = logged_in_state();

        let (_, created) = send_json_as(
            &state,
            Some(&credential),
            Method::POST,
            "/api/admin/remote/sections",
            Some(json!({"title": "News"})),
        )
        .await;
        let section_id = created["result"]["_id"].as_str().unwrap().to_owned();

        let (status, _) = send_json_as(
            &state,
            Some(&credential),
            Method::POST,
            &format!("/api/admin/remote/sections/{section_id}/content"),
            Some(json!({"title": "Hello", "content": {"type": "text", "value": "World"}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, listing) = send_json_as(
            &state,
            Some(&credential),
            Method::GET,
            "/api/admin/remote/sections",
            None,
        )
        .await;
        assert_eq!(listing[0]["title"], "News");
        assert_eq!(listing[0]["content"][0]["title"], "Hello");
    }
}
