//! Filesystem store for named canvas snapshots.
//!
//! Each canvas lives in its own directory under the data root:
//!
//! ```text
//! data/
//!   My Board/
//!     canvas.json    snapshot with injected meta block
//!     content.md     derived Markdown summary
//! ```
//!
//! Saves overwrite unconditionally. The store assumes a single client
//! and a single writer; there is no locking and no atomic replace.

mod error;
mod meta;
mod store;

pub use error::StoreError;
pub use meta::{CanvasIdentity, CanvasMeta};
pub use store::{CanvasStore, OpenedCanvas, SaveRequest, SavedCanvas};
