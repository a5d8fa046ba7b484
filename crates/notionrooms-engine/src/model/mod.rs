//! # Document Model
//!
//! Typed mirror of the document API's JSON shapes, decoded with serde.
//!
//! ## Modules
//!
//! - **`page`**: `Entry` (the assembler's input unit), `PageMarker`, icons and file sources
//! - **`block`**: `Block` tree and per-kind payloads
//! - **`rich_text`**: `RichText` spans with annotations, links and mentions
//! - **`database`**: schemas, rows and typed property values
//! - **`color`**: `Color` / `Hue` and their theme tokens
//!
//! ## Decoding Policy
//!
//! Blocks and property values decode leniently: a malformed payload degrades
//! to an unknown/unsupported variant for that node only, never failing the
//! surrounding sequence.

pub mod block;
pub mod color;
pub mod database;
pub mod page;
pub mod rich_text;

pub use block::*;
pub use color::{Color, Hue};
pub use database::*;
pub use page::*;
pub use rich_text::*;
