//! Snapshot inspection and Markdown export for tldraw canvas documents.
//!
//! The canvas library owns the document model; this crate only reads it.
//! A saved snapshot is treated as an opaque JSON tree from which we pull
//! the shape records, flatten their rich text, and render a Markdown
//! summary grouped by shape kind.

mod markdown;
mod rich_text;
mod snapshot;

pub use markdown::render_markdown;
pub use rich_text::extract_rich_text;
pub use snapshot::{shapes_from_snapshot, Shape};
