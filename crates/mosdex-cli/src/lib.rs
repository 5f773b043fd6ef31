//! Shared plumbing for the `gams2mosdex` and `mosdex2gams` executables.

pub mod logging;

use std::fs;
use std::path::Path;

/// Read an input file, naming the path in the error.
pub fn read_input(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()).into())
}
