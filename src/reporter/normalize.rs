//! Reporter argument normalization
//!
//! Callers configure reporters as a bare name, a `(name, output)` pair, or a
//! list mixing names with `{ "name": ..., "out_stream": ... }` objects.
//! Normalization shapes all of these into a flat list of [`ReporterSpec`]s,
//! validating the output target up front rather than coercing it.

use std::fmt;
use std::io::{self, Write};

use serde_json::Value;

use super::error::{ReporterError, Result};

/// A writable output target with an explicit end-of-stream hook.
pub trait ReporterSink: Write + Send {
    /// Called once when the reporter finishes; flushes by default.
    fn end(&mut self) -> io::Result<()> {
        self.flush()
    }
}

/// Where a reporter writes: a named file, or an in-process stream.
pub enum ReporterOutput {
    File(String),
    Stream(Box<dyn ReporterSink>),
}

impl fmt::Debug for ReporterOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReporterOutput::File(path) => f.debug_tuple("File").field(path).finish(),
            ReporterOutput::Stream(_) => f.debug_tuple("Stream").field(&"..").finish(),
        }
    }
}

/// One normalized reporter configuration entry.
#[derive(Debug)]
pub struct ReporterSpec {
    pub name: String,
    pub output: Option<ReporterOutput>,
}

impl ReporterSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output: None,
        }
    }

    /// Programmatic form of the "object exposing write/end capabilities"
    /// output target.
    pub fn with_stream(name: impl Into<String>, sink: Box<dyn ReporterSink>) -> Self {
        Self {
            name: name.into(),
            output: Some(ReporterOutput::Stream(sink)),
        }
    }
}

/// The accepted argument shapes, before normalization.
#[derive(Debug)]
pub enum ReporterArg {
    /// A single reporter name.
    Name(String),
    /// A single reporter with an output target to validate.
    NameWithOutput(String, Value),
    /// A list mixing name strings and `name`/`out_stream` objects.
    Many(Vec<Value>),
}

/// Flattens a [`ReporterArg`] into validated [`ReporterSpec`]s.
pub fn normalize_reporters(arg: ReporterArg) -> Result<Vec<ReporterSpec>> {
    match arg {
        ReporterArg::Name(name) => Ok(vec![ReporterSpec::named(name)]),
        ReporterArg::NameWithOutput(name, target) => Ok(vec![ReporterSpec {
            name,
            output: validate_output(&target)?,
        }]),
        ReporterArg::Many(entries) => entries.iter().map(normalize_entry).collect(),
    }
}

fn normalize_entry(entry: &Value) -> Result<ReporterSpec> {
    match entry {
        Value::String(name) => Ok(ReporterSpec::named(name.clone())),
        Value::Object(fields) => {
            let name = fields
                .get("name")
                .and_then(Value::as_str)
                .ok_or(ReporterError::InvalidEntry)?;
            let output = match fields.get("out_stream") {
                None => None,
                Some(target) => validate_output(target)?,
            };
            Ok(ReporterSpec {
                name: name.to_string(),
                output,
            })
        }
        _ => Err(ReporterError::InvalidEntry),
    }
}

fn validate_output(target: &Value) -> Result<Option<ReporterOutput>> {
    match target {
        Value::Null => Ok(None),
        Value::String(path) => Ok(Some(ReporterOutput::File(path.clone()))),
        _ => Err(ReporterError::InvalidOutput),
    }
}
