//! Pooled, reusable work directories
//!
//! Provides a root directory of integer-named subdirectories handed out as
//! unique work areas and reclaimed for reuse once released.

pub mod error;
pub mod pool;

pub use error::{Result, WorkdirError};
pub use pool::{Workdir, WorkdirPool, DEFAULT_POOL_DIR};
