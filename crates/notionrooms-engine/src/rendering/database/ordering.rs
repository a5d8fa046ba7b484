//! Column ordering for database tables.
//!
//! Columns follow schema declaration order unless some row carries an
//! `[Order: a, b, c]` directive in the [`ORDER_PROPERTY`] text column. The
//! title column is always first and the directive column itself is never
//! shown.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::model::{ORDER_PROPERTY, PropertySchema, PropertyType, Row};

/// A visible column: the schema key and its definition.
pub type Column<'a> = (&'a str, &'a PropertySchema);

/// Extracts the column names listed in an ordering directive.
pub fn parse_order_directive(text: &str) -> Option<Vec<String>> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = PATTERN
        .get_or_init(|| Regex::new(r"(?i)\[\s*order\s*:([^\]]*)\]").ok())
        .as_ref()?;
    let captures = pattern.captures(text)?;
    let names: Vec<String> = captures[1]
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    (!names.is_empty()).then_some(names)
}

/// First ordering directive found in any row.
pub fn find_order_directive(rows: &[Row]) -> Option<Vec<String>> {
    rows.iter()
        .find_map(|row| parse_order_directive(&row.text_of(ORDER_PROPERTY)))
}

/// Visible columns in display order.
pub fn resolve_columns<'a>(
    schema: &'a IndexMap<String, PropertySchema>,
    rows: &[Row],
) -> Vec<Column<'a>> {
    let visible = |name: &str| name != ORDER_PROPERTY;

    let mut columns: Vec<Column<'a>> = match find_order_directive(rows) {
        Some(order) => {
            let mut columns: Vec<Column<'a>> = Vec::with_capacity(order.len() + 1);
            for name in &order {
                match schema.get_key_value(name.as_str()) {
                    Some((key, property))
                        if visible(key.as_str()) && !columns.iter().any(|(seen, _)| *seen == key.as_str()) =>
                    {
                        columns.push((key.as_str(), property));
                    }
                    Some(_) => {}
                    None => log::debug!("Ordering directive names unknown column '{name}'"),
                }
            }
            columns
        }
        None => schema
            .iter()
            .filter(|(key, _)| visible(key.as_str()))
            .map(|(key, property)| (key.as_str(), property))
            .collect(),
    };

    let title = schema
        .iter()
        .find(|(_, property)| property.kind == PropertyType::Title);
    if let Some((key, property)) = title {
        columns.retain(|(name, _)| *name != key.as_str());
        columns.insert(0, (key.as_str(), property));
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn schema() -> IndexMap<String, PropertySchema> {
        serde_json::from_value(json!({
            "A": { "id": "a", "name": "A", "type": "rich_text" },
            "Name": { "id": "title", "name": "Name", "type": "title" },
            "B": { "id": "b", "name": "B", "type": "number" },
            "notionrooms": { "id": "n", "name": "notionrooms", "type": "rich_text" }
        }))
        .unwrap()
    }

    fn row_with_directive(directive: &str) -> Row {
        serde_json::from_value(json!({
            "id": "r",
            "properties": {
                "notionrooms": {
                    "type": "rich_text",
                    "rich_text": [{ "type": "text", "text": { "content": directive } }]
                }
            }
        }))
        .unwrap()
    }

    fn names(columns: &[Column<'_>]) -> Vec<String> {
        columns.iter().map(|(name, _)| name.to_string()).collect()
    }

    #[rstest]
    #[case("[Order: B, A]", Some(vec!["B", "A"]))]
    #[case("notes [order:Status ,  Owner ] trailing", Some(vec!["Status", "Owner"]))]
    #[case("[Order: ]", None)]
    #[case("no directive here", None)]
    fn test_parse_order_directive(#[case] text: &str, #[case] expected: Option<Vec<&str>>) {
        let expected: Option<Vec<String>> = expected.map(|names| names.into_iter().map(String::from).collect());
        assert_eq!(parse_order_directive(text), expected);
    }

    #[test]
    fn test_schema_order_with_title_first() {
        let schema = schema();
        assert_eq!(names(&resolve_columns(&schema, &[])), vec!["Name", "A", "B"]);
    }

    #[test]
    fn test_directive_overrides_order() {
        let schema = schema();
        let rows = [Row::default(), row_with_directive("[Order: B, A]")];
        assert_eq!(names(&resolve_columns(&schema, &rows)), vec!["Name", "B", "A"]);
    }

    #[test]
    fn test_directive_cannot_move_title_or_show_itself() {
        let schema = schema();
        let rows = [row_with_directive("[Order: A, Name, notionrooms, Ghost, A]")];
        assert_eq!(names(&resolve_columns(&schema, &rows)), vec!["Name", "A"]);
    }
}
