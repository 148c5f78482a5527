//! Full HTML document around a rendered page.

use std::fmt::Write;

use crate::escape::escape_html;
use crate::renderer::RenderedPage;

/// Reconnecting live reload client.
const LIVE_RELOAD_SCRIPT: &str = r#"<script>
(function connect() {
  var proto = location.protocol === "https:" ? "wss:" : "ws:";
  var ws = new WebSocket(proto + "//" + location.host + "/ws/live-reload");
  ws.onmessage = function (event) {
    var message = JSON.parse(event.data);
    if (message.type === "reload") location.reload();
  };
  ws.onclose = function () { setTimeout(connect, 1000); };
})();
</script>
"#;

const STYLE: &str = "<style>\n\
body { margin: 0; font-family: system-ui, sans-serif; background: #f0f2f5; color: #121417; }\n\
.page { max-width: 72rem; margin: 0 auto; padding: 2rem; }\n\
.page h1 { text-align: center; }\n\
.page-tabs ul { display: flex; gap: 1rem; list-style: none; padding: 1rem 2rem; margin: 0; background: #fff; }\n\
.page-tabs a { color: #61758a; text-decoration: none; }\n\
.page-tabs .active a { color: #121417; font-weight: 600; }\n\
section { display: flex; gap: 4rem; align-items: center; background: #fff; border: 1px solid #dbe0e5; \
border-radius: 0.5rem; padding: 2.5rem; margin-bottom: 3rem; }\n\
section .text { flex: 1; }\n\
.label, section p { color: #61758a; }\n\
.images img, .banner img { border-radius: 0.5rem; max-width: 360px; height: 200px; object-fit: cover; }\n\
</style>\n";

/// Wrap a rendered page into a complete HTML document.
///
/// With `live_reload` the page reloads itself whenever the server
/// announces a content change.
#[must_use]
pub fn render_document(page: &RenderedPage, live_reload: bool) -> String {
    let mut html = String::with_capacity(page.html.len() + 2048);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(&page.title));
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n");
    html.push_str(&page.html);
    if live_reload {
        html.push_str(LIVE_RELOAD_SCRIPT);
    }
    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use quill_model::default_collection;

    use super::*;
    use crate::renderer::PublicRenderer;

    #[test]
    fn test_document_wraps_fragment() {
        let page = PublicRenderer::new().render(&default_collection(), None);

        let html = render_document(&page, false);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Welcome to Your Content Hub</title>"));
        assert!(html.contains(&page.html));
        assert!(!html.contains("/ws/live-reload"));
    }

    #[test]
    fn test_document_with_live_reload() {
        let page = PublicRenderer::new().render(&default_collection(), None);

        let html = render_document(&page, true);

        assert!(html.contains("/ws/live-reload"));
    }
}
