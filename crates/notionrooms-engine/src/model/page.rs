use serde::Deserialize;

use super::{Block, RichText, plain_text};

/// One item of the flat input sequence handed to the page assembler.
///
/// Serialized externally tagged, mirroring the shape the source collaborator
/// produces: `{"master": {...}}` for page metadata and `{"block": {...}}` for
/// content.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entry {
    #[serde(rename = "master")]
    Page(PageMarker),
    Block(Block),
}

/// Whether the rendered object is a page or a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    #[default]
    Page,
    Database,
}

/// Page- or database-level metadata heading the entry sequence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMarker {
    pub id: String,
    #[serde(default)]
    pub object: ObjectKind,
    #[serde(default)]
    pub title: Vec<RichText>,
    #[serde(default)]
    pub icon: Option<Icon>,
    #[serde(default)]
    pub cover: Option<FileSource>,
    #[serde(default)]
    pub breadcrumb: Vec<Crumb>,
    /// Public address of the page, when the source exposes one.
    #[serde(default)]
    pub public_url: Option<String>,
}

impl PageMarker {
    pub fn title_text(&self) -> String {
        plain_text(&self.title)
    }
}

/// One ancestor in the breadcrumb trail, root first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Crumb {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub icon: Option<Icon>,
}

/// Page, database, callout or row icon.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    Emoji { emoji: String },
    External { external: FileUrl },
    File { file: FileUrl },
}

impl Icon {
    pub fn url(&self) -> Option<&str> {
        match self {
            Icon::Emoji { .. } => None,
            Icon::External { external: file } | Icon::File { file } => Some(&file.url),
        }
    }
}

/// A hosted or external file reference.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileSource {
    External { external: FileUrl },
    File { file: FileUrl },
}

impl FileSource {
    pub fn external(url: impl Into<String>) -> Self {
        FileSource::External {
            external: FileUrl { url: url.into() },
        }
    }

    pub fn url(&self) -> &str {
        match self {
            FileSource::External { external: file } | FileSource::File { file } => &file.url,
        }
    }

    /// Whether the file is hosted by the source rather than linked.
    pub fn is_hosted(&self) -> bool {
        matches!(self, FileSource::File { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileUrl {
    pub url: String,
}
