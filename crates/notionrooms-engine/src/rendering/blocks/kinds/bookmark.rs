use super::text::caption;
use crate::fetch::fallback_metadata;
use crate::model::BookmarkBlock;
use crate::rendering::RenderContext;
use crate::rendering::html::{escape, url_attr};

/// Bookmark and link-preview card. Blocks that were never enriched use the
/// hostname-only fallback metadata.
pub fn render_bookmark(payload: &BookmarkBlock, ctx: &RenderContext<'_>) -> String {
    let fallback;
    let metadata = match &payload.metadata {
        Some(metadata) => metadata,
        None => {
            fallback = fallback_metadata(&payload.url);
            &fallback
        }
    };

    let description = if metadata.description.is_empty() {
        String::new()
    } else {
        format!(
            "<div class=\"bookmark-description\">{}</div>",
            escape(&metadata.description)
        )
    };
    let favicon = if metadata.favicon.is_empty() {
        String::new()
    } else {
        format!(
            "<img class=\"bookmark-favicon\" src=\"{}\" alt=\"\">",
            url_attr(&metadata.favicon)
        )
    };
    let image = metadata
        .image
        .as_deref()
        .filter(|image| !image.is_empty())
        .map(|image| {
            format!(
                "<div class=\"bookmark-image\"><img src=\"{}\" alt=\"\" loading=\"lazy\"></div>",
                url_attr(image)
            )
        })
        .unwrap_or_default();

    format!(
        "<figure class=\"bookmark-container\">\
         <a class=\"bookmark\" href=\"{href}\" target=\"_blank\" rel=\"noopener noreferrer\">\
         <div class=\"bookmark-text\"><div class=\"bookmark-title\">{title}</div>{description}\
         <div class=\"bookmark-link\">{favicon}<span>{url}</span></div></div>{image}</a>{caption}</figure>",
        href = url_attr(&payload.url),
        title = escape(&metadata.title),
        url = escape(&payload.url),
        caption = caption(&payload.caption, ctx),
    )
}
