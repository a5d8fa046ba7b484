//! Database and table rendering.
//!
//! - **`properties`**: one cell value to display HTML
//! - **`ordering`**: visible columns and the `[Order: ...]` directive
//! - **`table`**: simple `table` blocks with `table_row` children

pub mod ordering;
pub mod properties;
pub mod table;

pub use ordering::{parse_order_directive, resolve_columns};
pub use properties::format_property;
pub use table::render_table;

use std::slice;

use self::ordering::Column;
use super::RenderContext;
use super::html::{escape, icon_html, url_attr};
use super::inline::render_rich_text;
use crate::model::{Database, PropertySchema, PropertyType, PropertyValue, Row};

/// Renders a database referenced from the page.
///
/// Inline databases render as a full table; full-page databases render as a
/// link card to their own page.
pub fn render_database(database: &Database, ctx: &RenderContext<'_>) -> String {
    if !database.is_inline {
        return render_database_link(database, ctx);
    }

    let columns = resolve_columns(&database.properties, &database.rows);
    let header: String = columns
        .iter()
        .map(|(key, property)| format!("<th>{}</th>", column_label(key, property)))
        .collect();
    let body: String = database
        .rows
        .iter()
        .map(|row| render_row(row, &columns, ctx))
        .collect();

    let title = database.title_text();
    let title = if title.is_empty() {
        String::new()
    } else {
        format!(
            "<div class=\"database-title\">{}</div>",
            render_rich_text(&database.title, ctx.options)
        )
    };

    format!(
        "<div class=\"database\">{title}<table class=\"database-table\"><thead><tr>{header}</tr></thead><tbody>{body}</tbody></table></div>"
    )
}

/// Link card for a database shown on its own page.
pub fn render_database_link(database: &Database, ctx: &RenderContext<'_>) -> String {
    let icon = database
        .icon
        .as_ref()
        .map(|icon| icon_html(icon, "database-icon"))
        .unwrap_or_default();
    format!(
        "<a class=\"database-link\" href=\"{}\">{icon}<span class=\"database-link-title\">{}</span></a>",
        url_attr(&ctx.options.page_url(&database.id)),
        escape(&database.title_text())
    )
}

/// Property sheet for a page that is itself a database row: one line per
/// visible column except the title, which the page header already shows.
pub fn render_database_table(database: &Database, row: &Row, ctx: &RenderContext<'_>) -> String {
    let rows = if database.rows.is_empty() {
        slice::from_ref(row)
    } else {
        database.rows.as_slice()
    };

    let lines: String = resolve_columns(&database.properties, rows)
        .into_iter()
        .filter(|(_, property)| property.kind != PropertyType::Title)
        .map(|(key, property)| {
            format!(
                "<tr><th>{}</th><td>{}</td></tr>",
                column_label(key, property),
                cell(row, key, property, ctx)
            )
        })
        .collect();

    format!("<table class=\"row-properties\"><tbody>{lines}</tbody></table>")
}

fn column_label(key: &str, property: &PropertySchema) -> String {
    let name = if property.name.is_empty() {
        key
    } else {
        property.name.as_str()
    };
    format!(
        "<span class=\"property-icon\">{}</span>{}",
        property.kind.icon(),
        escape(name)
    )
}

fn render_row(row: &Row, columns: &[Column<'_>], ctx: &RenderContext<'_>) -> String {
    let cells: String = columns
        .iter()
        .map(|(key, property)| {
            if property.kind == PropertyType::Title {
                format!("<td class=\"title-cell\">{}</td>", title_cell(row, key, ctx))
            } else {
                format!("<td>{}</td>", cell(row, key, property, ctx))
            }
        })
        .collect();
    format!("<tr id=\"{}\">{cells}</tr>", escape(&row.id))
}

/// Title linking to the row's page, with the row icon in front.
fn title_cell(row: &Row, key: &str, ctx: &RenderContext<'_>) -> String {
    let href = row
        .public_url
        .clone()
        .unwrap_or_else(|| ctx.options.page_url(&row.id));
    let icon = row
        .icon
        .as_ref()
        .map(|icon| icon_html(icon, "row-icon"))
        .unwrap_or_default();
    let title = match row.properties.get(key) {
        Some(PropertyValue::Title { title }) => render_rich_text(title, ctx.options),
        _ => String::new(),
    };
    format!("<a href=\"{}\">{icon}{title}</a>", url_attr(&href))
}

fn cell(row: &Row, key: &str, property: &PropertySchema, ctx: &RenderContext<'_>) -> String {
    row.properties
        .get(key)
        .map(|value| format_property(value, property.kind, ctx.options))
        .unwrap_or_default()
}
