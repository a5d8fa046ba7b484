//! Small HTML-writing helpers shared by every renderer.

use std::borrow::Cow;

use crate::model::{Color, Icon};

/// Check mark used by checkbox properties and to-do items.
pub const CHECK_ICON: &str = "<svg class=\"check-icon\" viewBox=\"0 0 14 14\" width=\"14\" height=\"14\"><polygon points=\"5.5 11.9993304 14 3.49933039 12.5 2 5.5 8.99933039 1.5 4.9968652 0 6.49933039\"></polygon></svg>";

/// Escapes `&`, `<`, `>`, `"` and `'` so the result is safe both as element
/// text and inside quoted attributes.
pub fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}

/// Returns the URL when its scheme is safe to place in `href`/`src`.
///
/// Relative URLs, fragments and the `http`, `https`, `mailto` and `tel`
/// schemes pass; anything else (`javascript:`, `data:` …) is rejected.
pub fn safe_url(url: &str) -> Option<&str> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.split_once(':') {
        Some((scheme, _)) if !scheme.contains('/') => {
            let scheme = scheme.to_ascii_lowercase();
            matches!(scheme.as_str(), "http" | "https" | "mailto" | "tel").then_some(trimmed)
        }
        _ => Some(trimmed),
    }
}

/// Escaped, scheme-checked attribute value; empty when the URL is unsafe.
pub fn url_attr(url: &str) -> String {
    safe_url(url)
        .map(|url| escape(url).into_owned())
        .unwrap_or_default()
}

/// Host name of a URL without a leading `www.`.
pub fn hostname(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Cuts `text` to `budget` characters, appending `...` when anything was
/// removed.
pub fn truncate(text: &str, budget: usize) -> Cow<'_, str> {
    match text.char_indices().nth(budget) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

/// Emoji icons render verbatim in a span, image icons as `<img>`.
pub fn icon_html(icon: &Icon, class: &str) -> String {
    match icon {
        Icon::Emoji { emoji } => format!("<span class=\"{class}\">{}</span>", escape(emoji)),
        Icon::External { external: file } | Icon::File { file } => format!(
            "<img class=\"{class}\" src=\"{}\" alt=\"\">",
            url_attr(&file.url)
        ),
    }
}

/// Percent-encodes a value for use inside a query string.
pub fn encode_query(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Class and inline-style accumulator for one element.
///
/// Classes and style declarations from different sources are merged, so a
/// block's color class and a kind's own inline style can coexist.
#[derive(Debug, Default, Clone)]
pub struct Attrs {
    classes: Vec<String>,
    styles: Vec<String>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() && !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn maybe_class(self, class: Option<String>) -> Self {
        match class {
            Some(class) => self.class(class),
            None => self,
        }
    }

    /// Adds one or more CSS declarations, normalized to end with `;`.
    pub fn style(mut self, declaration: impl Into<String>) -> Self {
        let declaration = declaration.into();
        let declaration = declaration.trim();
        if !declaration.is_empty() {
            let declaration = if declaration.ends_with(';') {
                declaration.to_string()
            } else {
                format!("{declaration};")
            };
            self.styles.push(declaration);
        }
        self
    }

    pub fn maybe_style(self, declaration: Option<String>) -> Self {
        match declaration {
            Some(declaration) => self.style(declaration),
            None => self,
        }
    }

    /// Contributes the class for a block's own color attribute.
    pub fn color(self, color: Color) -> Self {
        self.maybe_class(color.class())
    }

    /// Renders ` class="…" style="…"` with a leading space, or nothing.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape(&self.classes.join(" ")));
            out.push('"');
        }
        if !self.styles.is_empty() {
            out.push_str(" style=\"");
            out.push_str(&escape(&self.styles.join(" ")));
            out.push('"');
        }
        out
    }
}
