//! Text-bearing blocks: paragraphs, headings, quotes, to-dos, dividers and
//! block equations.

use crate::model::{Block, EquationBlock, HeadingBlock, RichText, TextBlock, ToDoBlock};
use crate::rendering::RenderContext;
use crate::rendering::blocks::render_children;
use crate::rendering::html::{Attrs, CHECK_ICON, escape};
use crate::rendering::inline::render_rich_text;

pub fn paragraph(block: &Block, payload: &TextBlock, ctx: &RenderContext<'_>) -> String {
    let attrs = Attrs::new().color(payload.color).render();
    format!(
        "<p{attrs}>{}</p>{}",
        render_rich_text(&payload.rich_text, ctx.options),
        indented(block, ctx)
    )
}

/// Headings shift down one level so the page title stays the only `<h1>`.
/// Toggleable headings fold their children under a `<details>`.
pub fn heading(block: &Block, payload: &HeadingBlock, ctx: &RenderContext<'_>) -> String {
    let level = block.heading_level().unwrap_or(1) + 1;
    let attrs = Attrs::new().color(payload.color).render();
    let text = render_rich_text(&payload.rich_text, ctx.options);
    let heading = format!("<h{level}{attrs}>{text}</h{level}>");

    if payload.is_toggleable {
        format!(
            "<details class=\"toggle heading-toggle\"><summary>{heading}</summary>{}</details>",
            render_children(block, ctx)
        )
    } else {
        heading
    }
}

pub fn quote(block: &Block, payload: &TextBlock, ctx: &RenderContext<'_>) -> String {
    let attrs = Attrs::new().color(payload.color).render();
    format!(
        "<blockquote{attrs}>{}{}</blockquote>",
        render_rich_text(&payload.rich_text, ctx.options),
        render_children(block, ctx)
    )
}

pub fn to_do(block: &Block, payload: &ToDoBlock, ctx: &RenderContext<'_>) -> String {
    let state = if payload.checked { " checked" } else { "" };
    let icon = if payload.checked { CHECK_ICON } else { "" };
    let attrs = Attrs::new()
        .class("to-do")
        .class(if payload.checked { "checked" } else { "" })
        .color(payload.color)
        .render();
    format!(
        "<div{attrs}><span class=\"checkbox{state}\">{icon}</span><span class=\"to-do-text\">{}</span></div>{}",
        render_rich_text(&payload.rich_text, ctx.options),
        indented(block, ctx)
    )
}

pub fn divider() -> String {
    "<hr>".to_string()
}

pub fn equation(payload: &EquationBlock) -> String {
    format!(
        "<div class=\"math-block\">\\[{}\\]</div>",
        escape(&payload.expression)
    )
}

/// `<figcaption>` for media captions, empty when there is no caption.
pub fn caption(spans: &[RichText], ctx: &RenderContext<'_>) -> String {
    if spans.is_empty() {
        return String::new();
    }
    format!(
        "<figcaption>{}</figcaption>",
        render_rich_text(spans, ctx.options)
    )
}

/// Children of a non-container block, indented under it.
fn indented(block: &Block, ctx: &RenderContext<'_>) -> String {
    let children = render_children(block, ctx);
    if children.is_empty() {
        children
    } else {
        format!("<div class=\"indented\">{children}</div>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockKind, Color, Hue, PageMarker};
    use crate::rendering::RenderOptions;
    use crate::rendering::render_block;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn render(value: serde_json::Value) -> String {
        let block: Block = serde_json::from_value(value).unwrap();
        let options = RenderOptions::default();
        let page = PageMarker::default();
        let ctx = RenderContext::new(&options, &page, &[]);
        render_block(&block, &ctx)
    }

    #[rstest]
    #[case("heading_1", "h2")]
    #[case("heading_2", "h3")]
    #[case("heading_3", "h4")]
    fn test_heading_levels(#[case] block_type: &str, #[case] tag: &str) {
        let html = render(json!({
            "id": "h",
            "type": block_type,
            block_type: { "rich_text": [{ "type": "text", "text": { "content": "Title" } }] }
        }));
        assert_eq!(html, format!("<{tag}>Title</{tag}>"));
    }

    #[test]
    fn test_toggleable_heading_wraps_children() {
        let html = render(json!({
            "id": "h",
            "type": "heading_1",
            "heading_1": { "rich_text": [{ "type": "text", "text": { "content": "More" } }], "is_toggleable": true },
            "children": [{ "id": "c", "type": "divider", "divider": {} }]
        }));

        assert_eq!(
            html,
            "<details class=\"toggle heading-toggle\"><summary><h2>More</h2></summary><div class=\"block\" id=\"c\"><hr></div></details>"
        );
    }

    #[test]
    fn test_background_color_adds_class() {
        let block = Block::new(
            "p",
            BlockKind::Paragraph {
                paragraph: TextBlock {
                    rich_text: vec![RichText::plain("tinted")],
                    color: Color::background(Hue::Yellow),
                },
            },
        );
        let options = RenderOptions::default();
        let page = PageMarker::default();
        let ctx = RenderContext::new(&options, &page, &[]);

        assert_eq!(render_block(&block, &ctx), "<p class=\"bg-yellow\">tinted</p>");
    }

    #[test]
    fn test_checked_to_do() {
        let html = render(json!({
            "id": "t",
            "type": "to_do",
            "to_do": { "rich_text": [{ "type": "text", "text": { "content": "ship it" } }], "checked": true }
        }));

        assert!(html.starts_with("<div class=\"to-do checked\"><span class=\"checkbox checked\"><svg"));
        assert!(html.ends_with("<span class=\"to-do-text\">ship it</span></div>"));
    }

    #[test]
    fn test_block_equation_is_escaped() {
        let html = render(json!({
            "id": "e",
            "type": "equation",
            "equation": { "expression": "x < y" }
        }));
        assert_eq!(html, "<div class=\"math-block\">\\[x &lt; y\\]</div>");
    }
}
