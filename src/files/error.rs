use thiserror::Error;

pub type Result<T> = std::result::Result<T, FileListError>;

#[derive(Debug, Error)]
pub enum FileListError {
    #[error("file or directory not found: {path}")]
    NotFound { path: String },

    #[error("invalid glob pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
