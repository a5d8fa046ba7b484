use crate::model::{Block, BlockKind, TableBlock};
use crate::rendering::RenderContext;
use crate::rendering::html::escape;
use crate::rendering::inline::render_rich_text;

/// Upper bound on the declared width; rows wider than this still render in full.
const MAX_TABLE_COLUMNS: usize = 100;

/// Renders a simple table from its `table_row` children.
///
/// Rows where no cell holds any span are skipped. Header cells are chosen by
/// position in the source, so skipping never promotes a body row to header.
pub fn render_table(table: &TableBlock, rows: &[Block], ctx: &RenderContext<'_>) -> String {
    let body: String = rows
        .iter()
        .enumerate()
        .filter_map(|(index, block)| match &block.kind {
            BlockKind::TableRow { table_row } => Some((index, block, &table_row.cells)),
            _ => {
                log::debug!("Ignoring {} block inside table", block.type_name());
                None
            }
        })
        .filter(|(_, _, cells)| !cells.iter().all(|cell| cell.is_empty()))
        .map(|(index, block, cells)| {
            let width = table.table_width.min(MAX_TABLE_COLUMNS).max(cells.len());
            let cells: String = (0..width)
                .map(|column| {
                    let header = (table.has_column_header && index == 0)
                        || (table.has_row_header && column == 0);
                    let tag = if header { "th" } else { "td" };
                    let content = cells
                        .get(column)
                        .map(|cell| render_rich_text(cell, ctx.options))
                        .unwrap_or_default();
                    format!("<{tag}>{content}</{tag}>")
                })
                .collect();
            format!("<tr id=\"{}\">{cells}</tr>", escape(&block.id))
        })
        .collect();

    format!("<table class=\"simple-table\"><tbody>{body}</tbody></table>")
}
