//! harness-fs - filesystem scaffolding for test runners
//!
//! This crate provides the filesystem-facing support pieces of a test
//! runner: a pool of reusable work directories, resolution of file lists
//! from paths, directories, and glob patterns, and normalization of
//! reporter configuration arguments.

pub mod files;
pub mod reporter;
pub mod util;
pub mod workdir;

pub use files::{FileListError, FileListResolver};
pub use reporter::{
    normalize_reporters, ReporterArg, ReporterError, ReporterOutput, ReporterSink, ReporterSpec,
};
pub use workdir::{Workdir, WorkdirError, WorkdirPool};
