use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReporterError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReporterError {
    #[error("reporter output must be a filename string, a writable stream, or unset")]
    InvalidOutput,

    #[error("reporter entry must be a name string or an object with a 'name' field")]
    InvalidEntry,
}
