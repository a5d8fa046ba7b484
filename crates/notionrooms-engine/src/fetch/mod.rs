//! # Fetch Phase
//!
//! Everything that talks to the outside world before rendering starts.
//!
//! - **`source`**: the [`SourceClient`] and [`Enricher`] collaborator traits
//! - **`materializer`**: [`Materializer::load_page`] resolves a page id into a
//!   complete [`Document`](crate::rendering::Document)
//! - **`metadata`**: fallback link metadata when enrichment fails
//!
//! Rendering never calls back into this module; it only reads what the
//! materializer attached.

pub mod materializer;
pub mod metadata;
pub mod source;

pub use materializer::{FetchError, Materializer, normalize_id};
pub use metadata::{fallback_metadata, favicon_service_url};
pub use source::{ChildrenPage, Enricher, NoEnrichment, PAGE_SIZE, SourceClient, SourceError};
