//! # List Runs
//!
//! Consecutive sibling list items of the same kind form one run and render
//! as a single `<ul>` or `<ol>`. Any other block, or a list item of the other
//! kind, ends the run.
//!
//! Numbering is scoped to the sibling slice the run lives in: the document
//! root or one container's children. Item `i` of a numbered run is numbered
//! `start + i`, where `start` is the first item's explicit start or 1.
//! Nested lists render through their parent item's children and so always
//! begin a fresh scope.

use crate::model::{Block, BlockKind, ListKind};
use crate::rendering::RenderContext;
use crate::rendering::blocks::render_children;
use crate::rendering::html::{Attrs, escape};
use crate::rendering::inline::render_rich_text;

/// Number of leading blocks that are list items of `kind`.
pub fn run_length(blocks: &[Block], kind: ListKind) -> usize {
    blocks
        .iter()
        .take_while(|block| block.list_kind() == Some(kind))
        .count()
}

/// Start number of a run: the first item's explicit start, otherwise 1.
pub fn start_number(run: &[Block]) -> u32 {
    match run.first().map(|block| &block.kind) {
        Some(BlockKind::NumberedListItem { numbered_list_item }) => {
            numbered_list_item.start.unwrap_or(1)
        }
        _ => 1,
    }
}

/// Effective number of the numbered item at `index` within its sibling
/// slice, or `None` if that block is not a numbered item.
pub fn item_number(siblings: &[Block], index: usize) -> Option<u32> {
    let block = siblings.get(index)?;
    if block.list_kind() != Some(ListKind::Numbered) {
        return None;
    }
    let preceding = siblings[..index]
        .iter()
        .rev()
        .take_while(|sibling| sibling.list_kind() == Some(ListKind::Numbered))
        .count();
    let first = index - preceding;
    let preceding = u32::try_from(preceding).unwrap_or(u32::MAX);
    Some(start_number(&siblings[first..]).saturating_add(preceding))
}

/// Renders one run as a list element.
///
/// Items past the first block that does not match `kind` are ignored, so a
/// caller can pass a longer slice than the run itself.
pub fn render_run(items: &[Block], kind: ListKind, start: u32, ctx: &RenderContext<'_>) -> String {
    let items = &items[..run_length(items, kind)];
    if items.is_empty() {
        return String::new();
    }

    let body: String = items.iter().map(|item| render_item(item, ctx)).collect();

    match kind {
        ListKind::Bulleted => format!("<ul class=\"bulleted-list\">{body}</ul>"),
        ListKind::Numbered if start == 1 => format!("<ol class=\"numbered-list\">{body}</ol>"),
        ListKind::Numbered => {
            format!("<ol class=\"numbered-list\" start=\"{start}\">{body}</ol>")
        }
    }
}

fn render_item(item: &Block, ctx: &RenderContext<'_>) -> String {
    let attrs = Attrs::new().class("block").color(item.color()).render();
    let text = item
        .rich_text()
        .map(|spans| render_rich_text(spans, ctx.options))
        .unwrap_or_default();
    format!(
        "<li{attrs} id=\"{}\">{text}{}</li>",
        escape(&item.id),
        render_children(item, ctx)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageMarker;
    use crate::rendering::{RenderOptions, render_sequence};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn item(id: &str, kind: &str, text: &str) -> Value {
        json!({
            "id": id,
            "type": kind,
            kind: { "rich_text": [{ "type": "text", "text": { "content": text } }] }
        })
    }

    fn render(value: Value) -> String {
        let blocks: Vec<Block> = serde_json::from_value(value).unwrap();
        let options = RenderOptions::default();
        let page = PageMarker::default();
        let ctx = RenderContext::new(&options, &page, &blocks);
        render_sequence(&blocks, &ctx)
    }

    #[test]
    fn test_interrupted_numbered_runs_restart() {
        let html = render(json!([
            item("n1", "numbered_list_item", "one"),
            item("n2", "numbered_list_item", "two"),
            item("n3", "numbered_list_item", "three"),
            item("b1", "bulleted_list_item", "bullet"),
            item("n4", "numbered_list_item", "one again"),
            item("n5", "numbered_list_item", "two again"),
        ]));

        assert_eq!(html.matches("<ol").count(), 2);
        assert_eq!(html.matches("<ul").count(), 1);
        assert!(!html.contains("start="));
        assert_eq!(
            html,
            "<ol class=\"numbered-list\"><li class=\"block\" id=\"n1\">one</li><li class=\"block\" id=\"n2\">two</li><li class=\"block\" id=\"n3\">three</li></ol>\
             <ul class=\"bulleted-list\"><li class=\"block\" id=\"b1\">bullet</li></ul>\
             <ol class=\"numbered-list\"><li class=\"block\" id=\"n4\">one again</li><li class=\"block\" id=\"n5\">two again</li></ol>"
        );
    }

    #[test]
    fn test_explicit_start_on_first_item() {
        let html = render(json!([
            {
                "id": "n1",
                "type": "numbered_list_item",
                "numbered_list_item": { "rich_text": [], "list_start_index": 5 }
            },
            item("n2", "numbered_list_item", "six"),
        ]));

        assert!(html.starts_with("<ol class=\"numbered-list\" start=\"5\">"));
        assert_eq!(html.matches("<ol").count(), 1);
    }

    #[test]
    fn test_consecutive_bullets_share_one_list() {
        let html = render(json!([
            item("b1", "bulleted_list_item", "a"),
            item("b2", "bulleted_list_item", "b"),
            { "id": "p", "type": "paragraph", "paragraph": { "rich_text": [] } },
            item("b3", "bulleted_list_item", "c"),
        ]));

        assert_eq!(html.matches("<ul").count(), 2);
        assert!(html.starts_with(
            "<ul class=\"bulleted-list\"><li class=\"block\" id=\"b1\">a</li><li class=\"block\" id=\"b2\">b</li></ul>"
        ));
    }

    #[test]
    fn test_nested_list_restarts_inside_item() {
        let html = render(json!([
            item("n1", "numbered_list_item", "one"),
            {
                "id": "n2",
                "type": "numbered_list_item",
                "numbered_list_item": { "rich_text": [{ "type": "text", "text": { "content": "two" } }] },
                "children": [
                    item("c1", "numbered_list_item", "two.one"),
                    item("c2", "numbered_list_item", "two.two")
                ]
            },
            item("n3", "numbered_list_item", "three"),
        ]));

        assert_eq!(
            html,
            "<ol class=\"numbered-list\"><li class=\"block\" id=\"n1\">one</li>\
             <li class=\"block\" id=\"n2\">two<ol class=\"numbered-list\"><li class=\"block\" id=\"c1\">two.one</li><li class=\"block\" id=\"c2\">two.two</li></ol></li>\
             <li class=\"block\" id=\"n3\">three</li></ol>"
        );
    }

    #[test]
    fn test_item_number_counts_run_within_parent_scope() {
        let blocks: Vec<Block> = serde_json::from_value(json!([
            {
                "id": "n1",
                "type": "numbered_list_item",
                "numbered_list_item": { "rich_text": [], "start": 3 }
            },
            item("n2", "numbered_list_item", "b"),
            item("p", "paragraph", "break"),
            item("n3", "numbered_list_item", "c"),
            item("n4", "numbered_list_item", "d"),
        ]))
        .unwrap();

        assert_eq!(item_number(&blocks, 0), Some(3));
        assert_eq!(item_number(&blocks, 1), Some(4));
        assert_eq!(item_number(&blocks, 2), None);
        assert_eq!(item_number(&blocks, 3), Some(1));
        assert_eq!(item_number(&blocks, 4), Some(2));
        assert_eq!(item_number(&blocks, 9), None);
    }

    #[test]
    fn test_run_start_comes_from_its_own_scope() {
        let html = render(json!([
            item("n1", "numbered_list_item", "one"),
            {
                "id": "t",
                "type": "toggle",
                "toggle": { "rich_text": [] },
                "children": [
                    {
                        "id": "c1",
                        "type": "numbered_list_item",
                        "numbered_list_item": { "rich_text": [], "start": 7 }
                    },
                    item("c2", "numbered_list_item", "eight")
                ]
            },
            item("n2", "numbered_list_item", "restart"),
        ]));

        assert!(html.contains(
            "<details class=\"toggle\"><summary></summary><ol class=\"numbered-list\" start=\"7\"><li class=\"block\" id=\"c1\"></li>"
        ));
        assert!(html.ends_with(
            "<ol class=\"numbered-list\"><li class=\"block\" id=\"n2\">restart</li></ol>"
        ));
    }

    #[test]
    fn test_render_run_stops_at_first_mismatch() {
        let blocks: Vec<Block> = serde_json::from_value(json!([
            item("b1", "bulleted_list_item", "a"),
            item("n1", "numbered_list_item", "b"),
        ]))
        .unwrap();
        let options = RenderOptions::default();
        let page = PageMarker::default();
        let ctx = RenderContext::new(&options, &page, &[]);

        assert_eq!(
            render_run(&blocks, ListKind::Bulleted, 1, &ctx),
            "<ul class=\"bulleted-list\"><li class=\"block\" id=\"b1\">a</li></ul>"
        );
    }
}
