use super::embed::classify_embed;
use super::text::caption;
use crate::model::{FileSource, MediaBlock, plain_text};
use crate::rendering::RenderContext;
use crate::rendering::html::{escape, url_attr};

pub fn image(payload: &MediaBlock, ctx: &RenderContext<'_>) -> String {
    format!(
        "<figure class=\"image\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\">{}</figure>",
        url_attr(payload.source.url()),
        escape(&plain_text(&payload.caption)),
        caption(&payload.caption, ctx)
    )
}

/// External links to known video hosts embed their player; anything else
/// plays in a native `<video>` element.
pub fn video(payload: &MediaBlock, ctx: &RenderContext<'_>) -> String {
    let url = payload.source.url();
    let player = match &payload.source {
        FileSource::External { .. } => {
            let embed = classify_embed(url);
            embed
                .provider
                .is_video()
                .then(|| embed.to_html())
        }
        FileSource::File { .. } => None,
    };
    let player = player.unwrap_or_else(|| {
        format!(
            "<video controls preload=\"metadata\" src=\"{}\"></video>",
            url_attr(url)
        )
    });
    format!(
        "<figure class=\"video\">{player}{}</figure>",
        caption(&payload.caption, ctx)
    )
}

pub fn audio(payload: &MediaBlock, ctx: &RenderContext<'_>) -> String {
    format!(
        "<figure class=\"audio\"><audio controls src=\"{}\"></audio>{}</figure>",
        url_attr(payload.source.url()),
        caption(&payload.caption, ctx)
    )
}

pub fn file(payload: &MediaBlock, ctx: &RenderContext<'_>) -> String {
    let url = payload.source.url();
    let name = payload
        .name
        .clone()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| file_name(url));
    format!(
        "<figure class=\"file\"><a class=\"file-download\" href=\"{}\" download>\
         <span class=\"file-icon\">📎</span><span class=\"file-name\">{}</span></a>{}</figure>",
        url_attr(url),
        escape(&name),
        caption(&payload.caption, ctx)
    )
}

pub fn pdf(payload: &MediaBlock, ctx: &RenderContext<'_>) -> String {
    format!(
        "<figure class=\"pdf\"><iframe src=\"{}\" width=\"100%\" height=\"600\" frameborder=\"0\"></iframe>{}</figure>",
        url_attr(payload.source.url()),
        caption(&payload.caption, ctx)
    )
}

/// Last path segment of a file URL, without query or fragment.
fn file_name(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "file".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, PageMarker};
    use crate::rendering::{RenderOptions, render_block};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(value: serde_json::Value) -> String {
        let block: Block = serde_json::from_value(value).unwrap();
        let options = RenderOptions::default();
        let page = PageMarker::default();
        let ctx = RenderContext::new(&options, &page, &[]);
        render_block(&block, &ctx)
    }

    #[test]
    fn test_image_with_caption() {
        let html = render(json!({
            "id": "i",
            "type": "image",
            "image": {
                "type": "external",
                "external": { "url": "https://example.com/cat.png" },
                "caption": [{ "type": "text", "text": { "content": "A \"cat\"" } }]
            }
        }));

        assert_eq!(
            html,
            "<figure class=\"image\"><img src=\"https://example.com/cat.png\" alt=\"A &quot;cat&quot;\" loading=\"lazy\">\
             <figcaption>A &quot;cat&quot;</figcaption></figure>"
        );
    }

    #[test]
    fn test_youtube_video_embeds_player() {
        let html = render(json!({
            "id": "v",
            "type": "video",
            "video": { "type": "external", "external": { "url": "https://youtu.be/dQw4w9WgXcQ" } }
        }));
        assert!(html.contains("src=\"https://www.youtube.com/embed/dQw4w9WgXcQ\""));
    }

    #[test]
    fn test_uploaded_video_uses_native_player() {
        let html = render(json!({
            "id": "v",
            "type": "video",
            "video": { "type": "file", "file": { "url": "https://files.example.com/clip.mp4" } }
        }));
        assert_eq!(
            html,
            "<figure class=\"video\"><video controls preload=\"metadata\" src=\"https://files.example.com/clip.mp4\"></video></figure>"
        );
    }

    #[test]
    fn test_file_name_falls_back_to_url() {
        let html = render(json!({
            "id": "f",
            "type": "file",
            "file": { "type": "file", "file": { "url": "https://files.example.com/a/report.pdf?sig=abc" } }
        }));
        assert!(html.contains("<span class=\"file-name\">report.pdf</span>"));
        assert!(html.contains("href=\"https://files.example.com/a/report.pdf?sig=abc\" download"));
    }
}
