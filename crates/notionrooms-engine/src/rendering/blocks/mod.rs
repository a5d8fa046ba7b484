//! # Block Rendering
//!
//! One handler per [`BlockKind`] variant, grouped by family under `kinds`.
//!
//! [`render_block`] produces the bare fragment for a single block.
//! [`render_sequence`] walks a sibling slice (the document root or a
//! container's children): it groups consecutive list items into one list
//! run, wraps every other non-empty fragment in a container keyed by the
//! block id, and is what containers use to render their children.

pub mod kinds;

use std::slice;

use super::RenderContext;
use super::html::escape;
use super::inline::render_rich_text;
use super::lists::{item_number, render_run, run_length, start_number};
use crate::model::{Block, BlockKind, RichText};

/// Renders one block without its id wrapper.
///
/// Unknown kinds render `""` unless they carry a generic rich-text payload,
/// which is shown as a plain paragraph.
pub fn render_block(block: &Block, ctx: &RenderContext<'_>) -> String {
    use kinds::{bookmark, code, containers, embed, media, navigation, text};

    match &block.kind {
        BlockKind::Paragraph { paragraph } => text::paragraph(block, paragraph, ctx),
        BlockKind::Heading1 { heading_1: heading }
        | BlockKind::Heading2 { heading_2: heading }
        | BlockKind::Heading3 { heading_3: heading } => text::heading(block, heading, ctx),
        BlockKind::Quote { quote } => text::quote(block, quote, ctx),
        BlockKind::ToDo { to_do } => text::to_do(block, to_do, ctx),
        BlockKind::Divider { .. } => text::divider(),
        BlockKind::Equation { equation } => text::equation(equation),
        BlockKind::BulletedListItem { .. } | BlockKind::NumberedListItem { .. } => {
            let run = slice::from_ref(block);
            match block.list_kind() {
                Some(kind) => render_run(run, kind, start_number(run), ctx),
                None => String::new(),
            }
        }
        BlockKind::Toggle { toggle } => containers::toggle(block, toggle, ctx),
        BlockKind::Callout { callout } => containers::callout(block, callout, ctx),
        BlockKind::ColumnList { .. } => containers::column_list(block, ctx),
        BlockKind::Column { .. } => containers::column(block, ctx),
        BlockKind::SyncedBlock { synced_block } => {
            containers::synced_block(block, synced_block, ctx)
        }
        BlockKind::Image { image } => media::image(image, ctx),
        BlockKind::Video { video } => media::video(video, ctx),
        BlockKind::Audio { audio } => media::audio(audio, ctx),
        BlockKind::File { file } => media::file(file, ctx),
        BlockKind::Pdf { pdf } => media::pdf(pdf, ctx),
        BlockKind::Embed { embed: payload } => {
            embed::render_embed(&payload.url, &payload.caption, ctx)
        }
        BlockKind::Bookmark { bookmark: payload }
        | BlockKind::LinkPreview {
            link_preview: payload,
        } => bookmark::render_bookmark(payload, ctx),
        BlockKind::Code { code: payload } => code::render_code(payload, ctx),
        BlockKind::Table { table } => {
            super::database::render_table(table, &block.children, ctx)
        }
        BlockKind::TableRow { .. } => {
            log::debug!("Skipping table_row {} outside a table", block.id);
            String::new()
        }
        BlockKind::TableOfContents { table_of_contents } => {
            navigation::table_of_contents(table_of_contents, ctx)
        }
        BlockKind::Breadcrumb { .. } => navigation::render_breadcrumb(ctx.page, ctx.options),
        BlockKind::ChildPage { child_page } => navigation::child_page(block, child_page, ctx),
        BlockKind::ChildDatabase { child_database } => {
            navigation::child_database(block, child_database, ctx)
        }
        BlockKind::DatabaseRow { database_row } => {
            super::database::render_database_table(&database_row.database, &database_row.row, ctx)
        }
        BlockKind::Unknown {
            block_type,
            rich_text,
        } => {
            log::debug!("No renderer for block {} of type '{block_type}'", block.id);
            fallback(rich_text, ctx)
        }
    }
}

/// Renders a sibling slice in order.
pub fn render_sequence(blocks: &[Block], ctx: &RenderContext<'_>) -> String {
    let mut out = String::new();
    let mut index = 0;

    while index < blocks.len() {
        let block = &blocks[index];

        if let Some(kind) = block.list_kind() {
            let run = &blocks[index..index + run_length(&blocks[index..], kind)];
            let start = item_number(blocks, index).unwrap_or(1);
            out.push_str(&render_run(run, kind, start, ctx));
            index += run.len();
            continue;
        }

        let html = render_block(block, ctx);
        if !html.is_empty() {
            out.push_str(&format!(
                "<div class=\"block\" id=\"{}\">{html}</div>",
                escape(&block.id)
            ));
        }
        index += 1;
    }

    out
}

/// Renders a block's children one level down, or nothing past the depth
/// bound.
pub fn render_children(block: &Block, ctx: &RenderContext<'_>) -> String {
    if block.children.is_empty() {
        return String::new();
    }
    ctx.nested()
        .map(|inner| render_sequence(&block.children, &inner))
        .unwrap_or_default()
}

fn fallback(rich_text: &[RichText], ctx: &RenderContext<'_>) -> String {
    if rich_text.is_empty() {
        return String::new();
    }
    format!("<p>{}</p>", render_rich_text(rich_text, ctx.options))
}
