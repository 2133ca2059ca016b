//! Repository-layout staging.
//!
//! Copies the POM and each artifact into
//! `<staging>/<group as path>/<artifactId>/<version>/` using Maven naming.
//! Nothing is rolled back on failure; a rerun overwrites whatever a previous
//! partial run left behind.

use crate::{
    bundler::{Result, error::ErrorExt, utils::fs},
    metadata::Coordinate,
};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::{checksum, signing::signature_path};

/// Creates the bundle's parent directory and deletes a stale bundle archive.
///
/// Runs before anything is staged so an archive from an earlier run can never
/// be mistaken for the output of this one.
pub async fn prepare_bundle_output(bundle_path: &Path) -> Result<()> {
    if let Some(bundle_dir) = bundle_path.parent() {
        fs::create_dir_all(bundle_dir)
            .await
            .staging_context("creating bundle directory", bundle_dir)?;
    }

    if fs::remove_file_if_exists(bundle_path)
        .await
        .staging_context("deleting previous bundle", bundle_path)?
    {
        log::debug!("Deleted previous bundle {}", bundle_path.display());
    }

    Ok(())
}

/// Copies the POM and artifacts into the repository layout under `staging_dir`.
///
/// Returns the staged paths: the POM first, then each artifact in the order given.
///
/// # Errors
///
/// Returns [`Error::StagingIo`](crate::bundler::Error::StagingIo) on any
/// filesystem failure, including a missing or non-regular source file.
pub async fn stage_files(
    staging_dir: &Path,
    coordinate: &Coordinate,
    pom_file: &Path,
    artifact_files: &[PathBuf],
) -> Result<Vec<PathBuf>> {
    let repository_dir = staging_dir.join(coordinate.repository_path());
    fs::create_dir_all(&repository_dir)
        .await
        .staging_context("creating repository directory", &repository_dir)?;

    let mut staged = Vec::with_capacity(artifact_files.len() + 1);

    let target_pom = repository_dir.join(coordinate.pom_file_name());
    stage_file(pom_file, &target_pom).await?;
    staged.push(target_pom);

    let mut seen: HashSet<OsString> = HashSet::new();
    seen.insert(coordinate.pom_file_name().into());

    for artifact in artifact_files {
        let file_name = artifact.file_name().ok_or_else(|| {
            crate::bundler::Error::StagingIo {
                action: "resolving file name of",
                path: artifact.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "artifact path has no file name",
                ),
            }
        })?;

        if !seen.insert(file_name.to_os_string()) {
            log::warn!(
                "Artifact {} has the same file name as an earlier staged file and will replace it",
                artifact.display()
            );
        }

        let target = repository_dir.join(file_name);
        stage_file(artifact, &target).await?;
        staged.push(target);
    }

    Ok(staged)
}

/// Copies one file into place after clearing its signature and checksum sidecars.
async fn stage_file(source: &Path, target: &Path) -> Result<()> {
    for sidecar in sidecar_paths(target) {
        fs::remove_file_if_exists(&sidecar)
            .await
            .staging_context("removing stale sidecar", &sidecar)?;
    }

    fs::copy_file(source, target)
        .await
        .staging_context("copying", source)?;

    log::debug!("Staged {} as {}", source.display(), target.display());
    Ok(())
}

/// Files derived from a staged file by later stages: its signature plus the
/// checksums of both the file and the signature.
fn sidecar_paths(target: &Path) -> Vec<PathBuf> {
    let signature = signature_path(target);
    let mut paths = checksum::checksum_paths(target);
    paths.extend(checksum::checksum_paths(&signature));
    paths.push(signature);
    paths
}
