use super::text::caption;
use crate::model::{CodeBlock, plain_text};
use crate::rendering::RenderContext;
use crate::rendering::html::escape;

/// Code block with a language header and copy button. Highlighting happens
/// client-side from the `language-*` class.
pub fn render_code(payload: &CodeBlock, ctx: &RenderContext<'_>) -> String {
    let language = payload
        .language
        .as_deref()
        .map(str::trim)
        .filter(|language| !language.is_empty())
        .unwrap_or("plain text");

    format!(
        "<div class=\"code-block\"><div class=\"code-header\"><span class=\"code-language\">{}</span>\
         <button class=\"copy-button\" type=\"button\">Copy</button></div>\
         <pre><code class=\"language-{}\">{}</code></pre>{}</div>",
        escape(language),
        language_class(language),
        escape(&plain_text(&payload.rich_text)),
        caption(&payload.caption, ctx)
    )
}

/// `Objective-C` → `objective-c`, `plain text` → `plain-text`.
fn language_class(language: &str) -> String {
    language
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '+' || c == '#' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}
