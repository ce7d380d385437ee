pub mod colors;
pub mod export;
pub mod map;

pub use map::{render_document, RenderError};
