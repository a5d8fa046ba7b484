//! Blocks whose main content is their children: toggles, callouts, column
//! layouts and synced blocks.

use crate::model::{Block, BlockKind, CalloutBlock, SyncedBlock, TextBlock};
use crate::rendering::RenderContext;
use crate::rendering::blocks::render_children;
use crate::rendering::html::{Attrs, escape, icon_html};
use crate::rendering::inline::render_rich_text;

/// Toggles always render their wrapper, even with no children.
pub fn toggle(block: &Block, payload: &TextBlock, ctx: &RenderContext<'_>) -> String {
    let attrs = Attrs::new().class("toggle").color(payload.color).render();
    format!(
        "<details{attrs}><summary>{}</summary>{}</details>",
        render_rich_text(&payload.rich_text, ctx.options),
        render_children(block, ctx)
    )
}

pub fn callout(block: &Block, payload: &CalloutBlock, ctx: &RenderContext<'_>) -> String {
    let attrs = Attrs::new()
        .class("callout")
        .color(payload.color)
        .maybe_style(payload.color.style())
        .render();
    let icon = payload
        .icon
        .as_ref()
        .map(|icon| icon_html(icon, "callout-icon"))
        .unwrap_or_default();
    format!(
        "<div{attrs}>{icon}<div class=\"callout-content\">{}{}</div></div>",
        render_rich_text(&payload.rich_text, ctx.options),
        render_children(block, ctx)
    )
}

/// Lays out `column` children side by side with a divider between each
/// pair. The column count is fixed here and shared by every column.
pub fn column_list(block: &Block, ctx: &RenderContext<'_>) -> String {
    let columns: Vec<&Block> = block
        .children
        .iter()
        .filter(|child| matches!(child.kind, BlockKind::Column { .. }))
        .collect();
    if columns.len() < block.children.len() {
        log::debug!(
            "Column list {} has {} non-column children, skipping them",
            block.id,
            block.children.len() - columns.len()
        );
    }

    let Some(inner) = ctx.nested() else {
        return "<div class=\"column-list\"></div>".to_string();
    };
    let inner = inner.with_columns(columns.len());

    let body = columns
        .iter()
        .map(|child| {
            format!(
                "<div class=\"block\" id=\"{}\">{}</div>",
                escape(&child.id),
                column(child, &inner)
            )
        })
        .collect::<Vec<_>>()
        .join("<div class=\"column-divider\"></div>");

    format!("<div class=\"column-list\">{body}</div>")
}

/// One column, sized from the enclosing list's column count.
pub fn column(block: &Block, ctx: &RenderContext<'_>) -> String {
    let count = ctx.column_count().max(1);
    format!(
        "<div class=\"column\" style=\"width: {}\">{}</div>",
        column_width(count, ctx.options.column_divider_px),
        render_children(block, ctx)
    )
}

/// `calc(100% / n - adj)` where the divider width is spread over the columns.
pub fn column_width(count: usize, divider_px: f64) -> String {
    let count = count.max(1);
    let adjust = divider_px * (count - 1) as f64 / count as f64;
    let adjust = (adjust * 100.0).round() / 100.0;
    format!("calc(100% / {count} - {adjust}px)")
}

/// Synced blocks render their (already resolved) children in place.
pub fn synced_block(block: &Block, payload: &SyncedBlock, ctx: &RenderContext<'_>) -> String {
    if block.children.is_empty() {
        if let Some(source) = &payload.synced_from {
            log::debug!(
                "Synced block {} has no resolved content from {}",
                block.id,
                source.block_id
            );
        }
        return String::new();
    }
    format!(
        "<div class=\"synced-block\">{}</div>",
        render_children(block, ctx)
    )
}
