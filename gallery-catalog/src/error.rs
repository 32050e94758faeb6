#[cfg(feature = "store")]
use std::path::PathBuf;
use thiserror::Error;

/// Id bookkeeping failures. Available without the `store` feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("artwork id {0} appears more than once")]
    DuplicateId(u32),

    #[error("no artwork id left after {0}")]
    IdsExhausted(u32),
}

#[cfg(feature = "store")]
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{path} is not a readable image: {source}")]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{0} has no file name")]
    MissingFileName(PathBuf),

    #[error(transparent)]
    Record(#[from] RecordError),
}

#[cfg(feature = "store")]
impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
