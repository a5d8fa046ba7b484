use serde::Deserialize;
use serde_json::{Map, Value};

use super::{Color, Database, FileSource, Icon, RichText, Row};

/// One node of the document tree.
///
/// Decoding is lenient per block: a payload that does not match its declared
/// `type` turns into [`BlockKind::Unknown`] instead of failing the whole
/// sequence, so siblings still render.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawBlock")]
pub struct Block {
    pub id: String,
    pub kind: BlockKind,
    pub has_children: bool,
    pub children: Vec<Block>,
}

impl Block {
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
            has_children: false,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.has_children = !children.is_empty();
        self.children = children;
        self
    }

    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    /// The block's own color attribute, default when the kind has none.
    pub fn color(&self) -> Color {
        match &self.kind {
            BlockKind::Paragraph { paragraph: b }
            | BlockKind::Quote { quote: b }
            | BlockKind::Toggle { toggle: b } => b.color,
            BlockKind::Heading1 { heading_1: h }
            | BlockKind::Heading2 { heading_2: h }
            | BlockKind::Heading3 { heading_3: h } => h.color,
            BlockKind::BulletedListItem {
                bulleted_list_item: item,
            }
            | BlockKind::NumberedListItem {
                numbered_list_item: item,
            } => item.color,
            BlockKind::Callout { callout } => callout.color,
            BlockKind::ToDo { to_do } => to_do.color,
            BlockKind::TableOfContents { table_of_contents } => table_of_contents.color,
            _ => Color::DEFAULT,
        }
    }

    /// Generic rich-text payload of text-bearing kinds.
    pub fn rich_text(&self) -> Option<&[RichText]> {
        match &self.kind {
            BlockKind::Paragraph { paragraph: b }
            | BlockKind::Quote { quote: b }
            | BlockKind::Toggle { toggle: b } => Some(&b.rich_text),
            BlockKind::Heading1 { heading_1: h }
            | BlockKind::Heading2 { heading_2: h }
            | BlockKind::Heading3 { heading_3: h } => Some(&h.rich_text),
            BlockKind::BulletedListItem {
                bulleted_list_item: item,
            }
            | BlockKind::NumberedListItem {
                numbered_list_item: item,
            } => Some(&item.rich_text),
            BlockKind::Callout { callout } => Some(&callout.rich_text),
            BlockKind::ToDo { to_do } => Some(&to_do.rich_text),
            BlockKind::Code { code } => Some(&code.rich_text),
            BlockKind::Unknown { rich_text, .. } => Some(rich_text),
            _ => None,
        }
    }

    /// List kind for list items, `None` for every other block.
    pub fn list_kind(&self) -> Option<ListKind> {
        match &self.kind {
            BlockKind::BulletedListItem { .. } => Some(ListKind::Bulleted),
            BlockKind::NumberedListItem { .. } => Some(ListKind::Numbered),
            _ => None,
        }
    }

    /// Heading level 1–3 for heading blocks.
    pub fn heading_level(&self) -> Option<u8> {
        match &self.kind {
            BlockKind::Heading1 { .. } => Some(1),
            BlockKind::Heading2 { .. } => Some(2),
            BlockKind::Heading3 { .. } => Some(3),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bulleted,
    Numbered,
}

/// Block payloads keyed by the API's `type` discriminator.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Paragraph {
        paragraph: TextBlock,
    },
    #[serde(rename = "heading_1")]
    Heading1 {
        heading_1: HeadingBlock,
    },
    #[serde(rename = "heading_2")]
    Heading2 {
        heading_2: HeadingBlock,
    },
    #[serde(rename = "heading_3")]
    Heading3 {
        heading_3: HeadingBlock,
    },
    BulletedListItem {
        bulleted_list_item: ListItemBlock,
    },
    NumberedListItem {
        numbered_list_item: ListItemBlock,
    },
    Toggle {
        toggle: TextBlock,
    },
    Callout {
        callout: CalloutBlock,
    },
    Quote {
        quote: TextBlock,
    },
    Divider {
        #[serde(default)]
        divider: Empty,
    },
    Image {
        image: MediaBlock,
    },
    Video {
        video: MediaBlock,
    },
    Audio {
        audio: MediaBlock,
    },
    File {
        file: MediaBlock,
    },
    Pdf {
        pdf: MediaBlock,
    },
    Embed {
        embed: EmbedBlock,
    },
    Bookmark {
        bookmark: BookmarkBlock,
    },
    LinkPreview {
        link_preview: BookmarkBlock,
    },
    Equation {
        equation: EquationBlock,
    },
    Code {
        code: CodeBlock,
    },
    Table {
        table: TableBlock,
    },
    TableRow {
        table_row: TableRowBlock,
    },
    TableOfContents {
        #[serde(default)]
        table_of_contents: TableOfContentsBlock,
    },
    ColumnList {
        #[serde(default)]
        column_list: Empty,
    },
    Column {
        #[serde(default)]
        column: Empty,
    },
    ChildPage {
        child_page: ChildPageBlock,
    },
    ChildDatabase {
        child_database: ChildDatabaseBlock,
    },
    DatabaseRow {
        database_row: DatabaseRowBlock,
    },
    Breadcrumb {
        #[serde(default)]
        breadcrumb: Empty,
    },
    SyncedBlock {
        #[serde(default)]
        synced_block: SyncedBlock,
    },
    ToDo {
        to_do: ToDoBlock,
    },
    /// A type this renderer does not know, or a known type whose payload
    /// failed to decode. Keeps whatever rich text could be salvaged.
    #[serde(skip)]
    Unknown {
        block_type: String,
        rich_text: Vec<RichText>,
    },
}

impl BlockKind {
    pub fn type_name(&self) -> &str {
        match self {
            BlockKind::Paragraph { .. } => "paragraph",
            BlockKind::Heading1 { .. } => "heading_1",
            BlockKind::Heading2 { .. } => "heading_2",
            BlockKind::Heading3 { .. } => "heading_3",
            BlockKind::BulletedListItem { .. } => "bulleted_list_item",
            BlockKind::NumberedListItem { .. } => "numbered_list_item",
            BlockKind::Toggle { .. } => "toggle",
            BlockKind::Callout { .. } => "callout",
            BlockKind::Quote { .. } => "quote",
            BlockKind::Divider { .. } => "divider",
            BlockKind::Image { .. } => "image",
            BlockKind::Video { .. } => "video",
            BlockKind::Audio { .. } => "audio",
            BlockKind::File { .. } => "file",
            BlockKind::Pdf { .. } => "pdf",
            BlockKind::Embed { .. } => "embed",
            BlockKind::Bookmark { .. } => "bookmark",
            BlockKind::LinkPreview { .. } => "link_preview",
            BlockKind::Equation { .. } => "equation",
            BlockKind::Code { .. } => "code",
            BlockKind::Table { .. } => "table",
            BlockKind::TableRow { .. } => "table_row",
            BlockKind::TableOfContents { .. } => "table_of_contents",
            BlockKind::ColumnList { .. } => "column_list",
            BlockKind::Column { .. } => "column",
            BlockKind::ChildPage { .. } => "child_page",
            BlockKind::ChildDatabase { .. } => "child_database",
            BlockKind::DatabaseRow { .. } => "database_row",
            BlockKind::Breadcrumb { .. } => "breadcrumb",
            BlockKind::SyncedBlock { .. } => "synced_block",
            BlockKind::ToDo { .. } => "to_do",
            BlockKind::Unknown { block_type, .. } => block_type.as_str(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Empty {}

/// Paragraph, quote and toggle payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub color: Color,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeadingBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub is_toggleable: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListItemBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub color: Color,
    /// Explicit start number; only meaningful on the first item of a
    /// numbered run.
    #[serde(default, alias = "list_start_index")]
    pub start: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalloutBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub icon: Option<Icon>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToDoBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodeBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

/// Image, video, audio, file and PDF payload.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaBlock {
    #[serde(flatten)]
    pub source: FileSource,
    #[serde(default)]
    pub caption: Vec<RichText>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbedBlock {
    pub url: String,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

/// Bookmark and link-preview payload; `metadata` is attached by the fetch
/// phase.
#[derive(Debug, Clone, Deserialize)]
pub struct BookmarkBlock {
    pub url: String,
    #[serde(default)]
    pub caption: Vec<RichText>,
    #[serde(default)]
    pub metadata: Option<LinkMetadata>,
}

/// Preview metadata for an external URL.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LinkMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub favicon: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EquationBlock {
    #[serde(default)]
    pub expression: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableBlock {
    #[serde(default)]
    pub table_width: usize,
    #[serde(default)]
    pub has_column_header: bool,
    #[serde(default)]
    pub has_row_header: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableRowBlock {
    #[serde(default)]
    pub cells: Vec<Vec<RichText>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableOfContentsBlock {
    #[serde(default)]
    pub color: Color,
}

/// Link to a sub-page; `url` and `icon` are attached by the fetch phase.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChildPageBlock {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon: Option<Icon>,
}

/// Reference to a database; `database` is attached by the fetch phase.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChildDatabaseBlock {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub database: Option<Database>,
}

/// Synthetic block used when the rendered page is itself a database row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseRowBlock {
    #[serde(default)]
    pub database: Database,
    #[serde(default)]
    pub row: Row,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncedBlock {
    #[serde(default)]
    pub synced_from: Option<SyncedFrom>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncedFrom {
    pub block_id: String,
}

#[derive(Deserialize)]
struct RawBlock {
    #[serde(default)]
    id: String,
    #[serde(rename = "type", default)]
    block_type: String,
    #[serde(default)]
    has_children: bool,
    #[serde(default)]
    children: Vec<Block>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        let payload = raw.rest.get(&raw.block_type).cloned().unwrap_or(Value::Null);

        let mut tagged = Map::new();
        tagged.insert("type".to_string(), Value::String(raw.block_type.clone()));
        tagged.insert(raw.block_type.clone(), payload.clone());

        let kind = match serde_json::from_value::<BlockKind>(Value::Object(tagged)) {
            Ok(kind) => kind,
            Err(e) => {
                log::warn!(
                    "Block {} of type '{}' could not be decoded: {e}",
                    raw.id,
                    raw.block_type
                );
                BlockKind::Unknown {
                    rich_text: salvage_rich_text(&payload),
                    block_type: raw.block_type,
                }
            }
        };

        Block {
            id: raw.id,
            kind,
            has_children: raw.has_children || !raw.children.is_empty(),
            children: raw.children,
        }
    }
}

fn salvage_rich_text(payload: &Value) -> Vec<RichText> {
    payload
        .get("rich_text")
        .and_then(|value| serde_json::from_value(value.clone()).ok())
        .unwrap_or_default()
}
