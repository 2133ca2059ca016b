//! Removal of transient repository metadata from the staging tree.
//!
//! Runs in two phases: the tree is walked to completion and matching files are
//! collected, then they are deleted. The tree is never modified while a walk
//! over it is open.

use crate::bundler::{Error, Result, error::ErrorExt, utils::fs};
use std::path::{Path, PathBuf};

/// Deletes every file under `root` whose name is exactly `file_name`.
///
/// # Returns
///
/// The deleted paths, in walk order. Empty when nothing matched.
///
/// # Errors
///
/// Returns [`Error::PruneIo`] if the tree cannot be walked or a file cannot be
/// deleted. Files deleted before the failure stay deleted.
pub async fn prune_metadata_files(root: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
    log::debug!("walking directory {}", root.display());

    let matches = {
        let root = root.to_path_buf();
        let file_name = file_name.to_string();
        tokio::task::spawn_blocking(move || find_files_named(&root, &file_name))
            .await
            .map_err(|e| Error::GenericError(format!("Metadata scan task panicked: {e}")))??
    };

    for path in &matches {
        log::debug!("deleting file {}", path.display());
        fs::remove_file_if_exists(path).await.prune_context(path)?;
    }

    Ok(matches)
}

/// Collects regular files named `file_name` at any depth below `root`.
fn find_files_named(root: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::PruneIo {
                path,
                source: e.into(),
            }
        })?;
        log::debug!("encountered path {}", entry.path().display());

        if entry.file_type().is_file() && entry.file_name() == file_name {
            found.push(entry.into_path());
        }
    }

    Ok(found)
}
