use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WorkdirError>;

#[derive(Debug, Error)]
pub enum WorkdirError {
    #[error("failed to prepare pool root {root:?}: {source}")]
    RootUnavailable {
        root: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to remove work directory {path:?}: {source}")]
    RemovalFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
