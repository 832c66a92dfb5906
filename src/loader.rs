//! This module provides the `TraceLoader` struct, responsible for reading traces from files
//! and strings. Every line of the input is one trace.

use crate::types::FaError;
use std::fs;
use std::path::Path;

/// `TraceLoader` is a utility struct for loading traces.
pub struct TraceLoader;

impl TraceLoader {
    /// Loads all traces from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` with one trace per line.
    /// * `Err(FaError::FileError)` if the file cannot be read.
    pub fn load_traces(path: &Path) -> Result<Vec<String>, FaError> {
        let content = fs::read_to_string(path).map_err(|e| {
            FaError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Ok(Self::load_traces_from_string(&content))
    }

    /// Splits the provided content into traces.
    ///
    /// Both `\n` and `\r\n` end a trace. A final line ending does not produce an empty trace.
    pub fn load_traces_from_string(content: &str) -> Vec<String> {
        content.lines().map(str::to_string).collect()
    }
}
