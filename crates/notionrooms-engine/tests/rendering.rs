use notionrooms_engine::rendering::blocks::kinds::navigation::collect_headings;
use notionrooms_engine::rendering::database::resolve_columns;
use notionrooms_engine::{
    Block, Database, Document, PageMarker, RenderContext, RenderOptions, render_page,
    render_page_or_error, render_sequence,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn read_fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}.json", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path}: {e}"))
}

fn load_document(name: &str) -> Document {
    Document::from_json(&read_fixture(name)).expect("fixture should decode")
}

fn render_blocks(value: Value) -> String {
    let blocks: Vec<Block> = serde_json::from_value(value).unwrap();
    let options = RenderOptions::default();
    let page = PageMarker::default();
    let ctx = RenderContext::new(&options, &page, &blocks);
    render_sequence(&blocks, &ctx)
}

fn text(content: &str) -> Value {
    json!([{ "type": "text", "text": { "content": content } }])
}

#[test]
fn test_kitchen_sink_renders_identically_twice() {
    let document = load_document("kitchen_sink");
    let options = RenderOptions::default();

    let first = render_page(&document, &options);
    let second = render_page(&document, &options);

    assert_eq!(first, second);
    assert_eq!(first.metadata.title, "Team Handbook");
}

#[test]
fn test_kitchen_sink_structure() {
    let page = render_page(&load_document("kitchen_sink"), &RenderOptions::default());
    let html = &page.html;

    assert!(html.starts_with("<div class=\"page-cover\">"));
    assert!(html.contains("<h1 class=\"page-title\">Team Handbook</h1>"));
    assert!(html.contains("<nav class=\"breadcrumb\">"));

    // Table of contents links every heading, nested ones included.
    assert!(html.contains("href=\"#h-welcome\""));
    assert!(html.contains("href=\"#h-deep\""));

    // Headings shift down one level under the page title.
    assert!(html.contains("<h2>Welcome</h2>"));
    assert!(html.contains("<h4>Deep dive</h4>"));

    assert!(html.contains("<ol class=\"numbered-list\"><li class=\"block\" id=\"n1\">"));
    assert_eq!(html.matches("column-divider").count(), 1);
    assert!(html.contains("https://www.youtube.com/embed/dQw4w9WgXcQ"));
    assert!(html.contains("https://www.google.com/s2/favicons?domain=docs.rs"));
    assert!(html.contains("<a href=\"/pages/5c1e7f6a2b9d4e3c8f0a1d2e3f4a5b6c\">"));

    // Blank table rows are dropped; the header row becomes th cells.
    assert!(!html.contains("id=\"tr1\""));
    assert!(html.contains("<th>Tool</th>"));

    assert!(!html.contains("widget"));
}

#[test]
fn test_malformed_block_does_not_block_siblings() {
    let page = render_page(&load_document("malformed_sibling"), &RenderOptions::default());

    assert!(page.html.contains("<div class=\"block\" id=\"first\"><p>zero</p></div>"));
    assert!(page.html.contains("<div class=\"block\" id=\"second\"><h3>one</h3></div>"));
    assert!(page.html.contains("id=\"fourth\""));
    assert!(!page.html.contains("id=\"broken\""));
    insta::assert_yaml_snapshot!("malformed_sibling_metadata", page.metadata);
}

#[test]
fn test_bold_red_text_exact_markup() {
    let html = render_blocks(json!([{
        "id": "p",
        "type": "paragraph",
        "paragraph": {
            "rich_text": [{
                "type": "text",
                "text": { "content": "Hi" },
                "annotations": { "bold": true, "color": "red" }
            }]
        }
    }]));

    assert_eq!(
        html,
        "<div class=\"block\" id=\"p\"><p><span style=\"color:var(--color-text-red);\"><b>Hi</b></span></p></div>"
    );
}

#[test]
fn test_markup_in_text_is_escaped() {
    let html = render_blocks(json!([{
        "id": "p",
        "type": "paragraph",
        "paragraph": { "rich_text": text("<script>alert(1)</script>") }
    }]));

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[test]
fn test_numbered_runs_restart_after_bullet() {
    let item = |id: &str, kind: &str| json!({ "id": id, "type": kind, kind: { "rich_text": text(id) } });
    let html = render_blocks(json!([
        item("a", "numbered_list_item"),
        item("b", "numbered_list_item"),
        item("c", "numbered_list_item"),
        item("x", "bulleted_list_item"),
        item("d", "numbered_list_item"),
        item("e", "numbered_list_item"),
    ]));

    assert_eq!(html.matches("<ol").count(), 2);
    assert_eq!(html.matches("<ul").count(), 1);
    let restarted = html.rfind("<ol").unwrap();
    assert!(html[restarted..].starts_with("<ol class=\"numbered-list\"><li class=\"block\" id=\"d\">"));
    assert!(!html.contains("start="));
}

#[test]
fn test_three_columns_share_width() {
    let column = |id: &str| json!({ "id": id, "type": "column", "column": {}, "children": [] });
    let html = render_blocks(json!([{
        "id": "cols",
        "type": "column_list",
        "column_list": {},
        "children": [column("c1"), column("c2"), column("c3")]
    }]));

    assert_eq!(html.matches("width: calc(100% / 3 - 30.67px)").count(), 3);
}

#[test]
fn test_unsupported_block_renders_nothing() {
    let html = render_blocks(json!([
        { "id": "w", "type": "unsupported_widget", "unsupported_widget": {} }
    ]));
    assert_eq!(html, "");
}

#[test]
fn test_order_directive_reorders_columns() {
    let database: Database = serde_json::from_value(json!({
        "id": "db",
        "is_inline": true,
        "properties": {
            "A": { "name": "A", "type": "rich_text" },
            "B": { "name": "B", "type": "rich_text" },
            "Name": { "name": "Name", "type": "title" },
            "notionrooms": { "name": "notionrooms", "type": "rich_text" }
        },
        "rows": [{
            "id": "r1",
            "properties": {
                "Name": { "type": "title", "title": text("First") },
                "notionrooms": { "type": "rich_text", "rich_text": text("[Order: Name, B, A]") }
            }
        }]
    }))
    .unwrap();

    let columns: Vec<&str> = resolve_columns(&database.properties, &database.rows)
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    insta::assert_yaml_snapshot!("ordered_columns", columns);
}

#[test]
fn test_headings_collected_in_document_order() {
    let document = load_document("kitchen_sink");
    let headings: Vec<String> = collect_headings(&document.blocks)
        .into_iter()
        .map(|heading| heading.id)
        .collect();
    assert_eq!(headings, vec!["h-welcome", "h-deep"]);
}

#[test]
fn test_unreadable_input_gives_error_page() {
    let page = render_page_or_error("{\"not\": \"a list\"}", &RenderOptions::default());
    assert!(page.html.starts_with("<div class=\"render-error\">"));
    assert_eq!(page.metadata.title, "Error");
}
