//! # Page Assembly
//!
//! Turns the flat entry sequence into one `{metadata, html}` result: cover,
//! icon and title header, optional breadcrumb bar, then the block fragments
//! in input order.

use serde::Serialize;
use serde_json::Value;

use super::blocks::kinds::navigation::render_breadcrumb;
use super::html::{escape, icon_html, url_attr};
use super::inline::render_rich_text;
use super::{RenderContext, RenderOptions, render_sequence};
use crate::error::RenderError;
use crate::model::{Block, Entry, Icon, PageMarker};

const UNTITLED: &str = "Untitled";

/// A decoded document: the root marker plus its top-level blocks.
#[derive(Debug, Clone)]
pub struct Document {
    pub page: PageMarker,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(page: PageMarker, blocks: Vec<Block>) -> Self {
        Self { page, blocks }
    }

    /// Builds a document from entries whose first item must be the page
    /// marker. Later markers are ignored.
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Result<Self, RenderError> {
        let mut entries = entries.into_iter();
        let page = match entries.next() {
            Some(Entry::Page(page)) => page,
            _ => return Err(RenderError::MissingRoot),
        };
        let blocks = entries
            .filter_map(|entry| match entry {
                Entry::Block(block) => Some(block),
                Entry::Page(marker) => {
                    log::warn!("Ignoring extra page marker {}", marker.id);
                    None
                }
            })
            .collect();
        Ok(Self::new(page, blocks))
    }

    /// Decodes an entries JSON array.
    ///
    /// The root marker must decode; any later entry that does not is logged
    /// and skipped so the rest of the page still renders.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        let raw: Vec<Value> = serde_json::from_str(json)?;
        let mut raw = raw.into_iter();

        let root = raw.next().ok_or(RenderError::MissingRoot)?;
        let page = match serde_json::from_value::<Entry>(root) {
            Ok(Entry::Page(page)) => page,
            Ok(Entry::Block(_)) => return Err(RenderError::MissingRoot),
            Err(e) => {
                log::warn!("Root page marker could not be decoded: {e}");
                return Err(RenderError::MissingRoot);
            }
        };

        let entries = raw.enumerate().filter_map(|(index, value)| {
            serde_json::from_value::<Entry>(value)
                .map_err(|e| log::warn!("Skipping entry {}: {e}", index + 1))
                .ok()
        });

        Self::from_entries(std::iter::once(Entry::Page(page)).chain(entries))
    }
}

/// Page-level data the caller needs alongside the HTML.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub favicon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPage {
    pub metadata: PageMetadata,
    pub html: String,
}

/// Renders a whole document. Pure: the same document and options always
/// give byte-identical output.
pub fn render_page(document: &Document, options: &RenderOptions) -> RenderedPage {
    let page = &document.page;
    let ctx = RenderContext::new(options, page, &document.blocks);
    log::debug!(
        "Rendering page {} with {} top-level blocks",
        page.id,
        document.blocks.len()
    );

    let mut html = String::new();
    if let Some(cover) = &page.cover {
        html.push_str(&format!(
            "<div class=\"page-cover\"><img src=\"{}\" alt=\"\"></div>",
            url_attr(cover.url())
        ));
    }
    html.push_str(&header(page, options));
    if !page.breadcrumb.is_empty() {
        html.push_str(&render_breadcrumb(page, options));
    }
    html.push_str(&render_sequence(&document.blocks, &ctx));

    RenderedPage {
        metadata: PageMetadata {
            title: title_or_untitled(page),
            favicon: page.icon.as_ref().map(favicon),
        },
        html,
    }
}

/// Decodes and renders in one step, turning request-level failures into the
/// error fragment. Never fails.
pub fn render_page_or_error(json: &str, options: &RenderOptions) -> RenderedPage {
    match Document::from_json(json) {
        Ok(document) => render_page(&document, options),
        Err(e) => {
            log::error!("Failed to render page: {e}");
            RenderedPage {
                metadata: PageMetadata {
                    title: "Error".to_string(),
                    favicon: None,
                },
                html: render_error_fragment(e.message()),
            }
        }
    }
}

/// Last-resort fragment shown when nothing else can be rendered.
pub fn render_error_fragment(message: &str) -> String {
    format!(
        "<div class=\"render-error\"><h1>Something went wrong</h1><p>{}</p></div>",
        escape(message)
    )
}

fn header(page: &PageMarker, options: &RenderOptions) -> String {
    let icon = page
        .icon
        .as_ref()
        .map(|icon| icon_html(icon, "page-icon"))
        .unwrap_or_default();
    let title = if page.title_text().is_empty() {
        UNTITLED.to_string()
    } else {
        render_rich_text(&page.title, options)
    };
    format!("<header class=\"page-header\">{icon}<h1 class=\"page-title\">{title}</h1></header>")
}

fn title_or_untitled(page: &PageMarker) -> String {
    let title = page.title_text();
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title
    }
}

/// Emoji icons become an inline SVG data URI; image icons are used as-is.
fn favicon(icon: &Icon) -> String {
    match icon {
        Icon::Emoji { emoji } => format!(
            "data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>{emoji}</text></svg>"
        ),
        Icon::External { external: file } | Icon::File { file } => file.url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_missing_root_is_an_error() {
        let json = json!([{ "block": { "id": "b", "type": "divider", "divider": {} } }]).to_string();
        assert!(matches!(
            Document::from_json(&json),
            Err(RenderError::MissingRoot)
        ));
        assert!(matches!(Document::from_json("[]"), Err(RenderError::MissingRoot)));
        assert!(matches!(
            Document::from_json("{not json"),
            Err(RenderError::Decode(_))
        ));
    }

    #[test]
    fn test_header_breadcrumb_and_blocks_in_order() {
        let json = json!([
            {
                "master": {
                    "id": "page",
                    "title": [{ "type": "text", "text": { "content": "Handbook" } }],
                    "icon": { "type": "emoji", "emoji": "📘" },
                    "cover": { "type": "external", "external": { "url": "https://example.com/cover.jpg" } },
                    "breadcrumb": [{ "id": "home", "title": "Home" }]
                }
            },
            { "block": { "id": "p", "type": "paragraph", "paragraph": { "rich_text": [{ "type": "text", "text": { "content": "Welcome" } }] } } }
        ])
        .to_string();

        let page = render_page_or_error(&json, &RenderOptions::default());

        assert_eq!(page.metadata.title, "Handbook");
        assert!(page.metadata.favicon.as_deref().unwrap().contains("📘"));

        let cover = page.html.find("page-cover").unwrap();
        let header = page.html.find("<h1 class=\"page-title\">Handbook</h1>").unwrap();
        let breadcrumb = page.html.find("<nav class=\"breadcrumb\">").unwrap();
        let block = page.html.find("<div class=\"block\" id=\"p\"><p>Welcome</p></div>").unwrap();
        assert!(cover < header && header < breadcrumb && breadcrumb < block);
    }

    #[test]
    fn test_image_icon_is_favicon_verbatim() {
        let document = Document::new(
            serde_json::from_value(json!({
                "id": "p",
                "icon": { "type": "external", "external": { "url": "https://example.com/icon.png" } }
            }))
            .unwrap(),
            Vec::new(),
        );

        let page = render_page(&document, &RenderOptions::default());

        assert_eq!(page.metadata.favicon.as_deref(), Some("https://example.com/icon.png"));
        assert_eq!(page.metadata.title, "Untitled");
    }

    #[test]
    fn test_error_page_uses_fixed_message() {
        let page = render_page_or_error("[]", &RenderOptions::default());
        assert_eq!(
            page.html,
            "<div class=\"render-error\"><h1>Something went wrong</h1><p>The page content could not be read.</p></div>"
        );
        assert_eq!(page.metadata.favicon, None);
    }

    #[test]
    fn test_metadata_serializes_null_favicon() {
        let page = RenderedPage {
            metadata: PageMetadata {
                title: "T".to_string(),
                favicon: None,
            },
            html: String::new(),
        };
        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({ "metadata": { "title": "T", "favicon": null }, "html": "" })
        );
    }
}
