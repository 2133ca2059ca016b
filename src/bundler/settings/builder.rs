//! Builder for constructing Settings.

use super::{STAGING_DIR_NAME, Settings, SigningSettings};
use std::path::{Path, PathBuf};

/// Build directory used when none is configured.
pub const DEFAULT_BUILD_DIRECTORY: &str = "target";

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use central_bundler::bundler::{SettingsBuilder, SigningSettings};
///
/// # fn example() -> central_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .pom_file("pom.xml")
///     .artifact_files(vec!["target/widget-1.0.0.jar".into()])
///     .signing(SigningSettings::disabled())
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SettingsBuilder {
    pom_file: Option<PathBuf>,
    artifact_files: Vec<PathBuf>,
    build_directory: Option<PathBuf>,
    staging_directory: Option<PathBuf>,
    remove_metadata_files: bool,
    signing: SigningSettings,
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self {
            pom_file: None,
            artifact_files: Vec::new(),
            build_directory: None,
            staging_directory: None,
            remove_metadata_files: true,
            signing: SigningSettings::default(),
        }
    }
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the POM descriptor.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn pom_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.pom_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the artifact list. Order is preserved through every stage.
    pub fn artifact_files(mut self, files: Vec<PathBuf>) -> Self {
        self.artifact_files = files;
        self
    }

    /// Appends one artifact.
    pub fn artifact_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.artifact_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Sets the build output directory.
    ///
    /// Default: `target`
    pub fn build_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.build_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the staging tree root.
    ///
    /// Default: `<build directory>/central-staging`
    pub fn staging_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.staging_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Controls metadata pruning.
    ///
    /// Default: `true`
    pub fn remove_metadata_files(mut self, remove: bool) -> Self {
        self.remove_metadata_files = remove;
        self
    }

    /// Sets the signing configuration.
    ///
    /// Default: enabled, `gpg`, no passphrase
    pub fn signing(mut self, signing: SigningSettings) -> Self {
        self.signing = signing;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `pom_file` was never set.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::Context;

        let pom_file = self.pom_file.context("pom_file is required")?;
        let build_directory = self
            .build_directory
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_DIRECTORY));
        let staging_directory = self
            .staging_directory
            .unwrap_or_else(|| build_directory.join(STAGING_DIR_NAME));

        Ok(Settings::new(
            pom_file,
            self.artifact_files,
            build_directory,
            staging_directory,
            self.remove_metadata_files,
            self.signing,
        ))
    }
}
