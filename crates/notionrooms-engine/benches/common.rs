// Shared page generators for the render benches.
use serde_json::{Value, json};

#[allow(dead_code)]
pub fn generate_page_json(sections: usize) -> String {
    let mut entries = vec![json!({
        "master": {
            "id": "bench-page",
            "title": [{ "type": "text", "text": { "content": "Benchmark" } }],
            "icon": { "type": "emoji", "emoji": "⏱" }
        }
    })];
    for i in 0..sections {
        entries.extend(section(i));
    }
    Value::Array(entries).to_string()
}

fn text(content: &str) -> Value {
    json!([
        { "type": "text", "text": { "content": content } },
        { "type": "text", "text": { "content": " linked", "link": { "url": "https://example.com" } }, "annotations": { "bold": true, "color": "blue" } }
    ])
}

fn section(i: usize) -> Vec<Value> {
    vec![
        json!({ "block": { "id": format!("h{i}"), "type": "heading_2", "heading_2": { "rich_text": text("Section") } } }),
        json!({ "block": { "id": format!("p{i}"), "type": "paragraph", "paragraph": { "rich_text": text("Paragraph with some content.") } } }),
        json!({ "block": { "id": format!("n{i}a"), "type": "numbered_list_item", "numbered_list_item": { "rich_text": text("First") } } }),
        json!({ "block": { "id": format!("n{i}b"), "type": "numbered_list_item", "numbered_list_item": { "rich_text": text("Second") } } }),
        json!({ "block": {
            "id": format!("t{i}"),
            "type": "toggle",
            "toggle": { "rich_text": text("More") },
            "children": [
                { "id": format!("c{i}"), "type": "code", "code": { "rich_text": text("fn main() {}"), "language": "rust" } }
            ]
        } }),
        json!({ "block": { "id": format!("e{i}"), "type": "embed", "embed": { "url": "https://vimeo.com/76979871" } } }),
    ]
}
