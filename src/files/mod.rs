//! File-list expansion from explicit paths, directories, and globs

pub mod casing;
pub mod error;
pub mod resolver;

pub use casing::actual_casing;
pub use error::{FileListError, Result};
pub use resolver::{FileListResolver, DEFAULT_SCAN_DIRS};
