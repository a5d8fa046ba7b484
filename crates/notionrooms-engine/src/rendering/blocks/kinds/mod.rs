pub mod bookmark;
pub mod code;
pub mod containers;
pub mod embed;
pub mod media;
pub mod navigation;
pub mod text;

pub use embed::{Embed, FrameTemplate, Provider, classify_embed};
