//! Main bundle pipeline orchestration.
//!
//! This module provides the [`Bundler`] that drives a run from the POM to the
//! finished archive.

use crate::{
    bundler::{CentralBundle, Error, METADATA_FILE_NAME, Result, Settings, StagedArtifact},
    metadata,
};
use std::sync::Arc;

use super::{
    archive::{ArchiveWriter, ZipArchiveWriter},
    checksum::{Sidecars, generate_checksums},
    prune::prune_metadata_files,
    signing::{GpgSigner, Signer},
    staging::{prepare_bundle_output, stage_files},
};

/// Assembles a Maven Central bundle.
///
/// Stages run strictly in order and the first failure ends the run:
///
/// 1. Create the bundle directory and delete any previous archive
/// 2. Read the coordinate from the POM
/// 3. Stage the POM and artifacts into the repository layout
/// 4. For each staged file, in order: sign, then write checksums
/// 5. Prune transient metadata files (if enabled)
/// 6. Archive the staging tree
///
/// # Examples
///
/// ```no_run
/// use central_bundler::bundler::{Bundler, SettingsBuilder};
///
/// # async fn example() -> central_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .pom_file("pom.xml")
///     .artifact_file("target/widget-1.0.0.jar")
///     .build()?;
///
/// let bundle = Bundler::new(settings)?.bundle().await?;
/// println!("Created bundle: {}", bundle.archive_path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler<S = GpgSigner, A = ZipArchiveWriter> {
    settings: Settings,
    signer: S,
    archiver: Arc<A>,
}

impl Bundler {
    /// Creates a bundler that signs with GnuPG and writes a zip archive.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Signing`] when signing is enabled and the signing
    /// tool cannot be found.
    pub fn new(settings: Settings) -> Result<Self> {
        let signer = GpgSigner::from_settings(settings.signing())?;
        Ok(Self::with_components(
            settings,
            signer,
            ZipArchiveWriter::default(),
        ))
    }
}

impl<S: Signer, A: ArchiveWriter> Bundler<S, A> {
    /// Creates a bundler with a custom signer and archive writer.
    pub fn with_components(settings: Settings, signer: S, archiver: A) -> Self {
        Self {
            settings,
            signer,
            archiver: Arc::new(archiver),
        }
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the whole pipeline.
    ///
    /// Nothing is rolled back on failure. Rerunning against a partially built
    /// staging tree is safe: staged files, signatures and checksums are
    /// rewritten and the archive is recreated from scratch.
    pub async fn bundle(&self) -> Result<CentralBundle> {
        let settings = &self.settings;

        // A failed run must never leave an older archive behind.
        let bundle_path = settings.bundle_path();
        prepare_bundle_output(&bundle_path).await?;

        let coordinate = metadata::load_coordinate(settings.pom_file()).await?;
        log::info!("Bundling {coordinate}");

        if settings.artifact_files().is_empty() {
            log::warn!("No artifact files given; the bundle will only contain the POM");
        }

        let staged = stage_files(
            settings.staging_directory(),
            &coordinate,
            settings.pom_file(),
            settings.artifact_files(),
        )
        .await?;

        let mut artifacts = Vec::with_capacity(staged.len());
        for path in staged {
            self.signer.sign(&path).await?;
            let Sidecars {
                signature,
                checksums,
            } = generate_checksums(&path).await?;

            log::info!(
                "Added artifact: {} ({} checksums{})",
                path.file_name().unwrap_or_default().to_string_lossy(),
                checksums.len(),
                if signature.is_some() { ", signed" } else { "" }
            );

            artifacts.push(StagedArtifact {
                path,
                signature,
                checksums,
            });
        }

        let pruned = if settings.remove_metadata_files() {
            prune_metadata_files(settings.staging_directory(), METADATA_FILE_NAME).await?
        } else {
            Vec::new()
        };

        let entries = {
            let archiver = Arc::clone(&self.archiver);
            let root = settings.staging_directory().to_path_buf();
            let destination = bundle_path.clone();
            tokio::task::spawn_blocking(move || archiver.write_tree(&root, &destination, false))
                .await
                .map_err(|e| Error::GenericError(format!("Archive task panicked: {e}")))??
        };

        log::info!(
            "Created bundle: {} ({} files)",
            bundle_path.display(),
            entries
        );

        Ok(CentralBundle {
            coordinate,
            archive_path: bundle_path,
            artifacts,
            pruned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{SettingsBuilder, SigningSettings};
    use std::path::Path;

    struct AlwaysFails;

    impl Signer for AlwaysFails {
        async fn sign(&self, file: &Path) -> Result<()> {
            Err(Error::Signing {
                path: file.to_path_buf(),
                failure: crate::bundler::SigningFailure::ExitStatus(Some(2)),
            })
        }
    }

    fn write_project(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
        let pom = dir.join("pom.xml");
        let jar = dir.join("widget-1.0.0.jar");
        std::fs::write(
            &pom,
            "<project><groupId>com.example</groupId><artifactId>widget</artifactId><version>1.0.0</version></project>",
        )
        .unwrap();
        std::fs::write(&jar, b"jar").unwrap();
        (pom, jar)
    }

    #[tokio::test]
    async fn unsigned_run_reports_each_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let (pom, jar) = write_project(dir.path());
        let settings = SettingsBuilder::new()
            .pom_file(&pom)
            .artifact_file(&jar)
            .build_directory(dir.path().join("target"))
            .signing(SigningSettings::disabled())
            .build()
            .unwrap();

        let bundle = Bundler::new(settings).unwrap().bundle().await.unwrap();

        assert_eq!(bundle.artifacts.len(), 2);
        assert!(bundle.artifacts.iter().all(|a| a.signature.is_none()));
        assert!(bundle.artifacts.iter().all(|a| a.checksums.len() == 3));
        assert!(bundle.archive_path.is_file());
    }

    #[tokio::test]
    async fn signing_failure_stops_before_checksums_and_archive() {
        let dir = tempfile::tempdir().unwrap();
        let (pom, jar) = write_project(dir.path());
        let settings = SettingsBuilder::new()
            .pom_file(&pom)
            .artifact_file(&jar)
            .build_directory(dir.path().join("target"))
            .build()
            .unwrap();
        let bundle_path = settings.bundle_path();
        let staged_pom = settings
            .staging_directory()
            .join("com/example/widget/1.0.0/widget-1.0.0.pom");

        let bundler =
            Bundler::with_components(settings, AlwaysFails, ZipArchiveWriter::default());
        let result = bundler.bundle().await;

        assert!(matches!(result, Err(Error::Signing { .. })));
        assert!(staged_pom.exists());
        assert!(!super::super::checksum::checksum_paths(&staged_pom)[0].exists());
        assert!(!bundle_path.exists());
    }
}
