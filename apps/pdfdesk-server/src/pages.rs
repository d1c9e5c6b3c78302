//! The browser-facing pages: home (tool list) and per-tool upload forms.
//!
//! Templates are embedded at compile time and filled with plain string
//! replacement; nothing user-controlled ever reaches them.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::tools::Tool;

const INDEX_HTML: &str = include_str!("../templates/index.html");
const TOOL_HTML: &str = include_str!("../templates/tool.html");

const SPLIT_OPTIONS: &str = r#"<p>
      <label><input type="radio" name="split_mode" value="pages" checked> Every page as its own PDF (ZIP)</label><br>
      <label><input type="radio" name="split_mode" value="range"> Extract pages:</label>
      <input type="text" name="pages" placeholder="e.g. 1-3, 5">
    </p>"#;

/// Handler: GET /
pub async fn home() -> Html<String> {
    let cards: String = Tool::ALL
        .iter()
        .map(|tool| {
            format!(
                r#"<div class="tool"><a href="/tools/{id}">{icon} {title}</a><p>{desc}</p></div>"#,
                id = tool.id(),
                icon = tool.icon(),
                title = tool.title(),
                desc = tool.description(),
            )
        })
        .collect();

    Html(INDEX_HTML.replace("{{ tool_cards }}", &cards))
}

const NOT_FOUND_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Not found - pdfdesk</title></head>
<body style="font-family: system-ui, sans-serif; max-width: 720px; margin: 3rem auto; padding: 0 1rem;">
  <h1>Not found</h1>
  <p>There is no such tool.</p>
  <p><a href="/">&larr; All tools</a></p>
</body>
</html>"#;

/// Handler: GET /tools/:tool_id
///
/// This is a browser page, so an unknown tool gets an HTML 404 rather than
/// the API's JSON error shape.
pub async fn tool_page(Path(tool_id): Path<String>) -> Response {
    match Tool::from_id(&tool_id) {
        Some(tool) => render_tool_page(tool).into_response(),
        None => (StatusCode::NOT_FOUND, Html(NOT_FOUND_HTML)).into_response(),
    }
}

fn render_tool_page(tool: Tool) -> Html<String> {
    let html = TOOL_HTML
        .replace("{{ tool_id }}", tool.id())
        .replace("{{ title }}", tool.title())
        .replace("{{ description }}", tool.description())
        .replace("{{ icon }}", tool.icon())
        .replace(
            "{{ multiple_attr }}",
            if tool.accepts_multiple() { "multiple" } else { "" },
        )
        .replace(
            "{{ split_options }}",
            if tool == Tool::Split { SPLIT_OPTIONS } else { "" },
        );

    Html(html)
}
