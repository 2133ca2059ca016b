//! Core Settings struct and implementations.

use super::SigningSettings;
use std::path::{Path, PathBuf};

/// Directory under the build directory that receives the bundle archive.
pub const BUNDLE_DIR_NAME: &str = "central-publishing";

/// File name of the bundle archive.
pub const BUNDLE_FILE_NAME: &str = "central-bundle.zip";

/// Default staging directory name under the build directory.
pub const STAGING_DIR_NAME: &str = "central-staging";

/// Transient repository metadata that must never ship in a bundle.
pub const METADATA_FILE_NAME: &str = "maven-metadata-central-staging.xml";

/// Settings for one bundle run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder).
///
/// # Examples
///
/// ```no_run
/// use central_bundler::bundler::SettingsBuilder;
///
/// # fn example() -> central_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .pom_file("pom.xml")
///     .artifact_file("target/widget-1.0.0.jar")
///     .build_directory("target")
///     .build()?;
///
/// assert!(settings.bundle_path().ends_with("central-publishing/central-bundle.zip"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Descriptor the coordinate is read from.
    pom_file: PathBuf,

    /// Artifacts to stage, in the order they are processed.
    artifact_files: Vec<PathBuf>,

    /// Build output directory. The bundle lands under it.
    build_directory: PathBuf,

    /// Root of the repository-layout staging tree.
    staging_directory: PathBuf,

    /// Whether to delete [`METADATA_FILE_NAME`] files before archiving.
    remove_metadata_files: bool,

    /// Detached-signature configuration.
    signing: SigningSettings,
}

impl Settings {
    pub(super) fn new(
        pom_file: PathBuf,
        artifact_files: Vec<PathBuf>,
        build_directory: PathBuf,
        staging_directory: PathBuf,
        remove_metadata_files: bool,
        signing: SigningSettings,
    ) -> Self {
        Self {
            pom_file,
            artifact_files,
            build_directory,
            staging_directory,
            remove_metadata_files,
            signing,
        }
    }

    /// Returns the POM descriptor path.
    pub fn pom_file(&self) -> &Path {
        &self.pom_file
    }

    /// Returns the artifact paths in caller-supplied order.
    pub fn artifact_files(&self) -> &[PathBuf] {
        &self.artifact_files
    }

    /// Returns the build output directory.
    pub fn build_directory(&self) -> &Path {
        &self.build_directory
    }

    /// Returns the staging tree root.
    pub fn staging_directory(&self) -> &Path {
        &self.staging_directory
    }

    /// Returns whether transient metadata files are pruned.
    pub fn remove_metadata_files(&self) -> bool {
        self.remove_metadata_files
    }

    /// Returns the signing configuration.
    pub fn signing(&self) -> &SigningSettings {
        &self.signing
    }

    /// Location of the bundle archive:
    /// `<build>/central-publishing/central-bundle.zip`.
    pub fn bundle_path(&self) -> PathBuf {
        self.build_directory
            .join(BUNDLE_DIR_NAME)
            .join(BUNDLE_FILE_NAME)
    }
}
