//! External tool detection.
//!
//! Resolves the signing executable on `PATH` before the pipeline relies on it.

use crate::bundler::{Error, Result, error::SigningFailure};
use std::path::PathBuf;

/// Locates the signing tool, accepting either a bare program name or a path.
pub fn locate_signing_tool(executable: &str) -> Result<PathBuf> {
    match which::which(executable) {
        Ok(path) => {
            log::debug!("Found {} at: {}", executable, path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", executable, e);
            Err(Error::Signing {
                path: PathBuf::from(executable),
                failure: SigningFailure::ToolNotFound(executable.to_string()),
            })
        }
    }
}
