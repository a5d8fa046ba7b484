use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use super::{Color, DateRange, FileSource, Icon, RichText, plain_text};

/// Name of the magic text property that carries a column-ordering directive.
pub const ORDER_PROPERTY: &str = "notionrooms";

/// A database: its property schema in declaration order plus any rows the
/// fetch phase resolved.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Vec<RichText>,
    #[serde(default)]
    pub is_inline: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon: Option<Icon>,
    #[serde(default)]
    pub properties: IndexMap<String, PropertySchema>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Database {
    pub fn title_text(&self) -> String {
        plain_text(&self.title)
    }
}

/// One column definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertySchema {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Title,
    RichText,
    Number,
    Select,
    MultiSelect,
    Date,
    CreatedTime,
    LastEditedTime,
    Checkbox,
    Url,
    Email,
    PhoneNumber,
    Files,
    People,
    #[serde(other)]
    Unsupported,
}

impl PropertyType {
    /// Glyph shown beside the column name in table headers.
    pub fn icon(self) -> &'static str {
        match self {
            PropertyType::Title => "Aa",
            PropertyType::RichText => "≡",
            PropertyType::Number => "#",
            PropertyType::Select => "▾",
            PropertyType::MultiSelect => "☰",
            PropertyType::Date | PropertyType::CreatedTime | PropertyType::LastEditedTime => {
                "◷"
            }
            PropertyType::Checkbox => "☑",
            PropertyType::Url => "🔗",
            PropertyType::Email => "@",
            PropertyType::PhoneNumber => "☎",
            PropertyType::Files => "📎",
            PropertyType::People => "👤",
            PropertyType::Unsupported => "•",
        }
    }
}

/// One database record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub public_url: Option<String>,
    #[serde(default)]
    pub icon: Option<Icon>,
    #[serde(default, deserialize_with = "lenient_properties")]
    pub properties: IndexMap<String, PropertyValue>,
}

impl Row {
    /// Plain text of a text-like property, empty when absent.
    pub fn text_of(&self, name: &str) -> String {
        match self.properties.get(name) {
            Some(PropertyValue::Title { title }) => plain_text(title),
            Some(PropertyValue::RichText { rich_text }) => plain_text(rich_text),
            _ => String::new(),
        }
    }

    /// Plain text of the row's title property.
    pub fn title_text(&self) -> String {
        self.properties
            .values()
            .find_map(|value| match value {
                PropertyValue::Title { title } => Some(plain_text(title)),
                _ => None,
            })
            .unwrap_or_default()
    }
}

/// Typed property value, in the API's `{"type": "...", "<type>": ...}` shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    Number {
        #[serde(default)]
        number: Option<f64>,
    },
    Select {
        #[serde(default)]
        select: Option<SelectOption>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    Date {
        #[serde(default)]
        date: Option<DateRange>,
    },
    CreatedTime {
        #[serde(default)]
        created_time: Option<String>,
    },
    LastEditedTime {
        #[serde(default)]
        last_edited_time: Option<String>,
    },
    Checkbox {
        #[serde(default)]
        checkbox: bool,
    },
    Url {
        #[serde(default)]
        url: Option<String>,
    },
    Email {
        #[serde(default)]
        email: Option<String>,
    },
    PhoneNumber {
        #[serde(default)]
        phone_number: Option<String>,
    },
    Files {
        #[serde(default)]
        files: Vec<FileRef>,
    },
    People {
        #[serde(default)]
        people: Vec<Person>,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Color,
}

/// A file attached to a `files` property.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileRef {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub source: FileSource,
    /// Set by the fetch phase when content sniffing found an image.
    #[serde(default)]
    pub is_image: bool,
}

/// A person referenced by a `people` property.
///
/// `name` stays `None` when the user could not be resolved, for instance when
/// the integration lacks permission to read users.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Decodes each property independently so one malformed value only loses
/// that cell.
fn lenient_properties<'de, D>(deserializer: D) -> Result<IndexMap<String, PropertyValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(name, value)| {
            let value = serde_json::from_value(value).unwrap_or_else(|e| {
                log::warn!("Malformed value for property '{name}': {e}");
                PropertyValue::Unsupported
            });
            (name, value)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_keeps_declaration_order() {
        let db: Database = serde_json::from_value(json!({
            "id": "db",
            "properties": {
                "Name": { "id": "title", "name": "Name", "type": "title" },
                "Zeta": { "id": "z", "name": "Zeta", "type": "number" },
                "Alpha": { "id": "a", "name": "Alpha", "type": "rich_text" }
            }
        }))
        .unwrap();

        let names: Vec<&str> = db.properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Name", "Zeta", "Alpha"]);
        assert_eq!(db.properties["Zeta"].kind, PropertyType::Number);
    }

    #[test]
    fn test_unknown_property_type_is_unsupported() {
        let schema: PropertySchema =
            serde_json::from_value(json!({ "id": "f", "name": "Calc", "type": "formula" }))
                .unwrap();
        assert_eq!(schema.kind, PropertyType::Unsupported);
    }

    #[test]
    fn test_malformed_property_value_only_loses_that_cell() {
        let row: Row = serde_json::from_value(json!({
            "id": "row-1",
            "properties": {
                "Name": { "type": "title", "title": [{ "type": "text", "text": { "content": "First" } }] },
                "Count": { "type": "number", "number": "not a number" }
            }
        }))
        .unwrap();

        assert_eq!(row.title_text(), "First");
        assert_eq!(row.properties["Count"], PropertyValue::Unsupported);
    }

    #[test]
    fn test_text_of_reads_rich_text_property() {
        let row: Row = serde_json::from_value(json!({
            "properties": {
                "notionrooms": {
                    "type": "rich_text",
                    "rich_text": [{ "type": "text", "text": { "content": "[Order: B, A]" } }]
                }
            }
        }))
        .unwrap();

        assert_eq!(row.text_of(ORDER_PROPERTY), "[Order: B, A]");
        assert_eq!(row.text_of("missing"), "");
    }
}
