use serde::Deserialize;

use super::Color;

/// A run of text with uniform annotations, link and mention state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RichText {
    #[serde(flatten)]
    pub kind: RichTextKind,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
}

impl RichText {
    /// Plain text span, mostly useful for building documents by hand.
    pub fn plain(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            kind: RichTextKind::Text {
                text: TextContent {
                    content: content.clone(),
                    link: None,
                },
            },
            annotations: Annotations::default(),
            plain_text: content,
            href: None,
        }
    }

    /// The raw text of this span: the text content for text spans, otherwise
    /// the API's `plain_text` rendition.
    pub fn content(&self) -> &str {
        match &self.kind {
            RichTextKind::Text { text } => &text.content,
            _ => &self.plain_text,
        }
    }

    /// Link target, preferring the explicit text link over `href`.
    pub fn link(&self) -> Option<&str> {
        match &self.kind {
            RichTextKind::Text {
                text: TextContent {
                    link: Some(link), ..
                },
            } => Some(&link.url),
            _ => self.href.as_deref(),
        }
    }
}

/// Joins the plain text of a span sequence.
pub fn plain_text(spans: &[RichText]) -> String {
    spans.iter().map(RichText::content).collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichTextKind {
    Text { text: TextContent },
    Equation { equation: Equation },
    Mention { mention: Mention },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Equation {
    #[serde(default)]
    pub expression: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

/// Inline references to other objects.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mention {
    LinkMention { link_mention: LinkMention },
    LinkPreview { link_preview: LinkPreviewMention },
    Page { page: ObjectRef },
    Database { database: ObjectRef },
    User { user: UserRef },
    Date { date: DateRange },
    #[serde(other)]
    Other,
}

/// Preview data the API attaches to a pasted link.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LinkMention {
    pub href: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkPreviewMention {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A date or date range as the API writes it: ISO dates or RFC 3339 datetimes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DateRange {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
}
