use std::path::PathBuf;

/// Errors from store operations.
///
/// `NotFound` and `Corrupt` are kept distinct so callers can map them to
/// different responses (404 vs 500).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("canvas not found: {name}")]
    NotFound { name: String },

    #[error("canvas name not usable as a directory name: {name:?}")]
    InvalidName { name: String },

    #[error("stored snapshot is not valid JSON: {path}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("io error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
