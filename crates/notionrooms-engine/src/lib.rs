pub mod error;
pub mod fetch;
pub mod model;
pub mod rendering;

// Re-export key types for easier usage
pub use error::RenderError;
pub use fetch::{Enricher, FetchError, Materializer, SourceClient, SourceError};
pub use model::*;
pub use rendering::{
    Document, PageMetadata, RenderContext, RenderOptions, RenderedPage, format_property,
    render_block, render_database, render_database_table, render_error_fragment, render_page,
    render_page_or_error, render_rich_text, render_run, render_sequence,
};
