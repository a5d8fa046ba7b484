use thiserror::Error;

use crate::model::{Block, Database, LinkMetadata, PageMarker, Person, Row};

/// Children requested per call when paging through a block.
pub const PAGE_SIZE: usize = 100;

/// Failures reported by the document source or the enrichment service.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Object not found: {0}")]
    NotFound(String),
    #[error("Permission denied for {0}")]
    PermissionDenied(String),
    #[error("Transport failure: {0}")]
    Transport(String),
}

/// One page of a block's children.
#[derive(Debug, Clone, Default)]
pub struct ChildrenPage {
    pub items: Vec<Block>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// Read access to the remote document API.
///
/// Implementations own authentication and transport; every call may fail
/// with [`SourceError`].
pub trait SourceClient {
    fn get_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
        page_size: usize,
    ) -> Result<ChildrenPage, SourceError>;

    fn get_page(&self, id: &str) -> Result<PageMarker, SourceError>;

    /// Database schema and metadata, without rows.
    fn get_database(&self, id: &str) -> Result<Database, SourceError>;

    fn query_database_rows(&self, id: &str) -> Result<Vec<Row>, SourceError>;

    fn get_user(&self, id: &str) -> Result<Person, SourceError>;
}

/// Link previews and content sniffing for external URLs.
pub trait Enricher {
    fn fetch_link_metadata(&self, url: &str) -> Result<LinkMetadata, SourceError>;

    /// Whether the URL serves an image. Failures count as `false`.
    fn is_image(&self, url: &str) -> bool;
}

/// Enricher for offline use: every lookup falls back.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnrichment;

impl Enricher for NoEnrichment {
    fn fetch_link_metadata(&self, url: &str) -> Result<LinkMetadata, SourceError> {
        Err(SourceError::Transport(format!("enrichment disabled for {url}")))
    }

    fn is_image(&self, _url: &str) -> bool {
        false
    }
}
