//! Reporter configuration normalization

pub mod error;
pub mod normalize;

pub use error::{ReporterError, Result};
pub use normalize::{
    normalize_reporters, ReporterArg, ReporterOutput, ReporterSink, ReporterSpec,
};
