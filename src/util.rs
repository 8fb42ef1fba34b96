use anyhow::{anyhow, Result};
use std::path::Path;

/// Reads a whole file, naming the `kind` of file in the error message.
pub fn read_to_string(path: &Path, kind: &str) -> Result<String> {
    match std::fs::read_to_string(path) {
        Err(e) => Err(anyhow!("Opening {} file `{}`: {}", kind, path.display(), e)),
        Ok(contents) => Ok(contents),
    }
}
