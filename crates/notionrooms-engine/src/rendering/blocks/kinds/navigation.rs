//! Blocks that point elsewhere: table of contents, breadcrumb, child pages
//! and databases.

use crate::model::{
    Block, ChildDatabaseBlock, ChildPageBlock, Icon, PageMarker, TableOfContentsBlock,
    plain_text,
};
use crate::rendering::database::render_database;
use crate::rendering::html::{Attrs, escape, icon_html, url_attr};
use crate::rendering::{RenderContext, RenderOptions};

const DEFAULT_PAGE_ICON: &str = "📄";

/// A heading found anywhere in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingRef {
    pub id: String,
    pub level: u8,
    pub text: String,
}

/// Every heading in document order, including those nested in containers.
pub fn collect_headings(blocks: &[Block]) -> Vec<HeadingRef> {
    let mut headings = Vec::new();
    collect_into(blocks, &mut headings);
    headings
}

fn collect_into(blocks: &[Block], headings: &mut Vec<HeadingRef>) {
    for block in blocks {
        if let Some(level) = block.heading_level() {
            headings.push(HeadingRef {
                id: block.id.clone(),
                level,
                text: block.rich_text().map(plain_text).unwrap_or_default(),
            });
        }
        collect_into(&block.children, headings);
    }
}

pub fn table_of_contents(payload: &TableOfContentsBlock, ctx: &RenderContext<'_>) -> String {
    let attrs = Attrs::new()
        .class("table-of-contents")
        .color(payload.color)
        .render();
    let links: String = collect_headings(ctx.root)
        .into_iter()
        .map(|heading| {
            format!(
                "<a class=\"toc-item toc-level-{}\" href=\"#{}\">{}</a>",
                heading.level,
                escape(&heading.id),
                escape(&heading.text)
            )
        })
        .collect();
    format!("<nav{attrs}>{links}</nav>")
}

/// Ancestors of the page, root first, ending at the page itself.
pub fn render_breadcrumb(page: &PageMarker, options: &RenderOptions) -> String {
    let mut crumbs: Vec<String> = page
        .breadcrumb
        .iter()
        .map(|crumb| {
            format!(
                "<a class=\"breadcrumb-item\" href=\"{}\">{}<span>{}</span></a>",
                url_attr(&options.page_url(&crumb.id)),
                crumb_icon(crumb.icon.as_ref()),
                escape(&crumb.title)
            )
        })
        .collect();
    crumbs.push(format!(
        "<span class=\"breadcrumb-item current\">{}<span>{}</span></span>",
        crumb_icon(page.icon.as_ref()),
        escape(&page.title_text())
    ));
    format!(
        "<nav class=\"breadcrumb\">{}</nav>",
        crumbs.join("<span class=\"breadcrumb-separator\">/</span>")
    )
}

fn crumb_icon(icon: Option<&Icon>) -> String {
    icon.map(|icon| icon_html(icon, "breadcrumb-icon"))
        .unwrap_or_default()
}

pub fn child_page(block: &Block, payload: &ChildPageBlock, ctx: &RenderContext<'_>) -> String {
    let href = payload
        .url
        .clone()
        .unwrap_or_else(|| ctx.options.page_url(&block.id));
    let icon = match &payload.icon {
        Some(icon) => icon_html(icon, "child-page-icon"),
        None => format!("<span class=\"child-page-icon\">{DEFAULT_PAGE_ICON}</span>"),
    };
    let title = if payload.title.is_empty() {
        "Untitled"
    } else {
        payload.title.as_str()
    };
    format!(
        "<a class=\"child-page\" href=\"{}\">{icon}<span class=\"child-page-title\">{}</span></a>",
        url_attr(&href),
        escape(title)
    )
}

/// Resolved databases render through the database renderer; unresolved ones
/// still link to their page by block id.
pub fn child_database(
    block: &Block,
    payload: &ChildDatabaseBlock,
    ctx: &RenderContext<'_>,
) -> String {
    match &payload.database {
        Some(database) => render_database(database, ctx),
        None => format!(
            "<a class=\"database-link\" href=\"{}\"><span class=\"database-link-title\">{}</span></a>",
            url_attr(&ctx.options.page_url(&block.id)),
            escape(&payload.title)
        ),
    }
}
