//! # Inline Rendering
//!
//! Turns a sequence of rich-text spans into one HTML-safe inline string.
//!
//! Annotations wrap innermost to outermost in a fixed order: bold, italic,
//! strikethrough, underline, code, then the color span, then the link
//! anchor. Spans are concatenated in input order with no separators.

pub mod mention;

use std::sync::OnceLock;

use regex::Regex;

use super::RenderOptions;
use super::html::{escape, safe_url};
use crate::model::{Annotations, Color, RichText, RichTextKind};

/// Renders spans to inline HTML.
pub fn render_rich_text(spans: &[RichText], options: &RenderOptions) -> String {
    spans
        .iter()
        .map(|span| render_span(span, options))
        .collect()
}

pub fn render_span(span: &RichText, options: &RenderOptions) -> String {
    match &span.kind {
        RichTextKind::Equation { equation } => {
            render_inline_equation(&equation.expression, span.annotations.color)
        }
        RichTextKind::Mention { mention } => mention::render_mention(mention, span, options),
        RichTextKind::Text { .. } | RichTextKind::Unknown => {
            annotate(span.content(), &span.annotations, span.link())
        }
    }
}

/// Escapes `content` and applies annotations, color and link.
pub fn annotate(content: &str, annotations: &Annotations, link: Option<&str>) -> String {
    let mut html = escape(content).into_owned();

    if annotations.bold {
        html = format!("<b>{html}</b>");
    }
    if annotations.italic {
        html = format!("<i>{html}</i>");
    }
    if annotations.strikethrough {
        html = format!("<s>{html}</s>");
    }
    if annotations.underline {
        html = format!("<u>{html}</u>");
    }
    if annotations.code {
        html = format!("<code>{html}</code>");
    }
    if let Some(style) = annotations.color.style() {
        html = format!("<span style=\"{style}\">{html}</span>");
    }
    match link {
        Some(url) => wrap_link(url, html),
        None => html,
    }
}

/// Wraps already-rendered inline HTML in an anchor. Unsafe URLs leave the
/// content unlinked.
pub fn wrap_link(url: &str, inner: String) -> String {
    let Some(href) = safe_url(url) else {
        log::debug!("Dropping link with unsupported scheme");
        return inner;
    };

    if href.starts_with("https://github.com/") {
        let label = github_item(href)
            .map(|item| escape(item).into_owned())
            .unwrap_or(inner);
        return format!(
            "<a href=\"{}\" class=\"github-link\"><i class=\"fab fa-github\"></i> {label}</a>",
            escape(href)
        );
    }

    format!("<a href=\"{}\">{inner}</a>", escape(href))
}

/// Last path segment of `github.com/<owner>/<repo>/<kind>/<item>[/...]` links.
fn github_item(url: &str) -> Option<&str> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = PATTERN
        .get_or_init(|| {
            Regex::new(r"^https://github\.com/[^/]+/[^/]+/[^/]+/(?:[^/]+/)*([^/?#]+)/?$").ok()
        })
        .as_ref()?;
    pattern
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|item| item.as_str())
}

fn render_inline_equation(expression: &str, color: Color) -> String {
    let style = color
        .style()
        .map(|style| format!(" style=\"{style}\""))
        .unwrap_or_default();
    format!(
        "<span class=\"math-expression\"{style}>\\({}\\)</span>",
        escape(expression)
    )
}
