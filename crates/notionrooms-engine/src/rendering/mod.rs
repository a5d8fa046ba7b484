//! # Rendering
//!
//! Pure functions from the in-memory document model to HTML strings.
//!
//! ## Modules
//!
//! - **`inline`**: rich-text spans, annotations, links and mentions
//! - **`blocks`**: per-kind block renderers and the sibling-sequence walker
//! - **`lists`**: list-run grouping and numbering
//! - **`database`**: property formatting, column ordering and database tables
//! - **`page`**: page header, breadcrumb and the final `{metadata, html}` result
//! - **`html`** / **`format`**: escaping, attribute building, number and date display
//!
//! Nothing here performs I/O. Every renderer receives a [`RenderContext`]
//! carrying the options and the root page it renders for.

pub mod blocks;
pub mod database;
pub mod format;
pub mod html;
pub mod inline;
pub mod lists;
pub mod page;

pub use blocks::{render_block, render_sequence};
pub use database::{format_property, render_database, render_database_table};
pub use inline::render_rich_text;
pub use lists::render_run;
pub use page::{
    Document, PageMetadata, RenderedPage, render_error_fragment, render_page,
    render_page_or_error,
};

use crate::model::{Block, PageMarker};

/// Knobs the caller controls; everything else is derived from the input.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Base for page links: `{service_url}/pages/{id}`.
    pub service_url: String,
    /// Children deeper than this are dropped with a warning.
    pub max_depth: usize,
    /// Width adjustment, in pixels, shared between the dividers of a column list.
    pub column_divider_px: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            service_url: "/".to_string(),
            max_depth: 32,
            column_divider_px: 46.0,
        }
    }
}

impl RenderOptions {
    /// Route of a page inside the service, id without dashes.
    pub fn page_url(&self, id: &str) -> String {
        format!(
            "{}/pages/{}",
            self.service_url.trim_end_matches('/'),
            id.replace('-', "")
        )
    }
}

/// Read-only state threaded through one render call.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub options: &'a RenderOptions,
    /// Metadata of the page being rendered.
    pub page: &'a PageMarker,
    /// Top-level blocks of the document, used by the table of contents.
    pub root: &'a [Block],
    depth: usize,
    columns: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(options: &'a RenderOptions, page: &'a PageMarker, root: &'a [Block]) -> Self {
        Self {
            options,
            page,
            root,
            depth: 0,
            columns: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Context for one level further down, or `None` past the depth bound.
    pub fn nested(&self) -> Option<Self> {
        if self.depth >= self.options.max_depth {
            log::warn!(
                "Maximum render depth {} reached, dropping nested content",
                self.options.max_depth
            );
            return None;
        }
        Some(Self {
            depth: self.depth + 1,
            ..*self
        })
    }

    /// Number of columns in the enclosing column list, 0 outside one.
    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn with_columns(self, columns: usize) -> Self {
        Self { columns, ..self }
    }
}
