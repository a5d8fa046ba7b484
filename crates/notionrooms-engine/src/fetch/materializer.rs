//! Builds a fully resolved [`Document`] from the remote source.
//!
//! The materializer walks the block tree depth first, paging through every
//! block's children and attaching what the renderer needs but the block API
//! does not return inline: child page icons, inline database schemas and
//! rows, link preview metadata, image sniffing for files and resolved
//! people. Only failures on the root escape; anything below it is logged
//! and skipped.

use std::collections::HashSet;

use thiserror::Error;
use uuid::Uuid;

use super::metadata::fallback_metadata;
use super::source::{Enricher, PAGE_SIZE, SourceClient, SourceError};
use crate::model::{
    Block, BlockKind, ChildDatabaseBlock, Database, ObjectKind, PropertyValue, Row,
};
use crate::rendering::Document;

/// Fetch-phase failures that stop the whole request.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid page id: {0}")]
    InvalidId(String),
    #[error("Root page not found: {0}")]
    RootNotFound(String),
    #[error("Block {0} is its own ancestor")]
    Cycle(String),
    #[error("Source failure: {0}")]
    Source(#[from] SourceError),
}

impl FetchError {
    /// HTTP-style status for callers serving the rendered page.
    pub fn status(&self) -> u16 {
        match self {
            FetchError::InvalidId(_) => 400,
            FetchError::RootNotFound(_) => 404,
            FetchError::Cycle(_) => 422,
            FetchError::Source(_) => 502,
        }
    }

    /// Fixed user-facing message; internal detail stays in the logs.
    pub fn message(&self) -> &'static str {
        match self {
            FetchError::InvalidId(_) => "The requested page id is not valid.",
            FetchError::RootNotFound(_) => "The requested page does not exist or is not shared.",
            FetchError::Cycle(_) | FetchError::Source(_) => "The page content could not be read.",
        }
    }
}

/// Normalizes a page id, dashed or not, to the dashed lowercase form.
pub fn normalize_id(id: &str) -> Result<String, FetchError> {
    Uuid::parse_str(id.trim())
        .map(|uuid| uuid.hyphenated().to_string())
        .map_err(|_| FetchError::InvalidId(id.to_string()))
}

pub struct Materializer<'a, S, E> {
    source: &'a S,
    enricher: &'a E,
    max_depth: usize,
}

impl<'a, S: SourceClient, E: Enricher> Materializer<'a, S, E> {
    pub fn new(source: &'a S, enricher: &'a E) -> Self {
        Self {
            source,
            enricher,
            max_depth: 32,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Loads a page, or a database shown as a page, with its whole tree.
    pub fn load_page(&self, id: &str) -> Result<Document, FetchError> {
        let id = normalize_id(id)?;
        let page = self.source.get_page(&id).map_err(|e| match e {
            SourceError::NotFound(_) | SourceError::PermissionDenied(_) => {
                log::warn!("Root page {id} unavailable: {e}");
                FetchError::RootNotFound(id.clone())
            }
            other => FetchError::Source(other),
        })?;
        log::info!("Loading page {id}");

        let blocks = match page.object {
            ObjectKind::Database => {
                let mut database = self.source.get_database(&id)?;
                database.is_inline = true;
                database.rows = self.load_rows(&id);
                vec![Block::new(
                    id.clone(),
                    BlockKind::ChildDatabase {
                        child_database: ChildDatabaseBlock {
                            title: database.title_text(),
                            database: Some(database),
                        },
                    },
                )]
            }
            ObjectKind::Page => {
                let mut ancestors = vec![id.clone()];
                self.load_children(&id, 0, &mut ancestors)?
            }
        };

        Ok(Document::new(page, blocks))
    }

    fn load_children(
        &self,
        parent_id: &str,
        depth: usize,
        ancestors: &mut Vec<String>,
    ) -> Result<Vec<Block>, FetchError> {
        if depth >= self.max_depth {
            log::warn!(
                "Maximum fetch depth {} reached below {parent_id}",
                self.max_depth
            );
            return Ok(Vec::new());
        }

        let mut blocks = self.fetch_all_children(parent_id);

        for block in &mut blocks {
            if ancestors.contains(&block.id) {
                return Err(FetchError::Cycle(block.id.clone()));
            }
            self.enrich(block);

            let Some(source_id) = children_source(block) else {
                continue;
            };
            ancestors.push(block.id.clone());
            let children = self.load_children(&source_id, depth + 1, ancestors);
            ancestors.pop();
            block.children = children?;
            block.has_children = !block.children.is_empty();
        }

        Ok(blocks)
    }

    /// Pages through a block's children. A failing page, or a cursor the
    /// source already handed out, ends the listing with whatever was already
    /// collected.
    fn fetch_all_children(&self, parent_id: &str) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut cursor: Option<String> = None;
        let mut seen_cursors = HashSet::new();

        loop {
            let page = match self
                .source
                .get_children(parent_id, cursor.as_deref(), PAGE_SIZE)
            {
                Ok(page) => page,
                Err(e) => {
                    log::warn!("Skipping remaining children of {parent_id}: {e}");
                    break;
                }
            };
            log::debug!("Fetched {} children of {parent_id}", page.items.len());
            blocks.extend(page.items);

            match (page.has_more, page.next_cursor) {
                (true, Some(next)) if seen_cursors.insert(next.clone()) => cursor = Some(next),
                (true, Some(next)) => {
                    log::warn!("Cursor {next} repeated while listing {parent_id}; stopping");
                    break;
                }
                _ => break,
            }
        }

        blocks
    }

    fn enrich(&self, block: &mut Block) {
        match &mut block.kind {
            BlockKind::Bookmark { bookmark: payload }
            | BlockKind::LinkPreview {
                link_preview: payload,
            } => {
                if payload.metadata.is_none() {
                    let metadata = self
                        .enricher
                        .fetch_link_metadata(&payload.url)
                        .unwrap_or_else(|e| {
                            log::warn!("Link metadata unavailable for block {}: {e}", block.id);
                            fallback_metadata(&payload.url)
                        });
                    payload.metadata = Some(metadata);
                }
            }
            BlockKind::ChildPage { child_page } => match self.source.get_page(&block.id) {
                Ok(page) => {
                    child_page.icon = child_page.icon.take().or(page.icon);
                    child_page.url = child_page.url.take().or(page.public_url);
                }
                Err(e) => log::warn!("Child page {} unavailable: {e}", block.id),
            },
            BlockKind::ChildDatabase { child_database } => {
                if child_database.database.is_none() {
                    child_database.database = self.load_database(&block.id);
                }
            }
            BlockKind::DatabaseRow { database_row } => {
                self.enrich_row(&mut database_row.row);
            }
            _ => {}
        }
    }

    fn load_database(&self, id: &str) -> Option<Database> {
        match self.source.get_database(id) {
            Ok(mut database) => {
                database.rows = self.load_rows(id);
                Some(database)
            }
            Err(e) => {
                log::warn!("Database {id} unavailable: {e}");
                None
            }
        }
    }

    fn load_rows(&self, database_id: &str) -> Vec<Row> {
        match self.source.query_database_rows(database_id) {
            Ok(mut rows) => {
                rows.iter_mut().for_each(|row| self.enrich_row(row));
                rows
            }
            Err(e) => {
                log::warn!("Rows of database {database_id} unavailable: {e}");
                Vec::new()
            }
        }
    }

    /// Sniffs file types and resolves people. Unresolved people stay
    /// nameless and render as `N/A`.
    fn enrich_row(&self, row: &mut Row) {
        for value in row.properties.values_mut() {
            match value {
                PropertyValue::Files { files } => {
                    for file in files.iter_mut() {
                        file.is_image = self.enricher.is_image(file.source.url());
                    }
                }
                PropertyValue::People { people } => {
                    for person in people.iter_mut().filter(|person| person.name.is_none()) {
                        match self.source.get_user(&person.id) {
                            Ok(user) => *person = user,
                            Err(e) => log::warn!("User {} unresolved: {e}", person.id),
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

/// Id to list children from, if the block's children live in this page.
///
/// Child pages and databases are separate documents, so their content is
/// never inlined. Synced copies list the original block's children.
fn children_source(block: &Block) -> Option<String> {
    match &block.kind {
        BlockKind::ChildPage { .. } | BlockKind::ChildDatabase { .. } => None,
        BlockKind::SyncedBlock { synced_block } => match &synced_block.synced_from {
            Some(source) => Some(source.block_id.clone()),
            None => block.has_children.then(|| block.id.clone()),
        },
        _ if block.has_children && block.children.is_empty() => Some(block.id.clone()),
        _ => None,
    }
}
