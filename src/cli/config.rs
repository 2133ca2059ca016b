//! TOML configuration file.
//!
//! Keys mirror the command line options in camelCase:
//!
//! ```toml
//! pomFile = "pom.xml"
//! artifactFiles = ["target/widget-1.0.0.jar", "target/widget-1.0.0-sources.jar"]
//! buildDirectory = "target"
//! removeMetaDataFiles = true
//! gpgSign = true
//! gpgKeyName = "ABCD1234"
//! gpgTimeoutSecs = 120
//! ```
//!
//! Relative paths are resolved against the directory containing the file.

use crate::error::{BundlerError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings read from a config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    pub pom_file: Option<PathBuf>,
    pub artifact_files: Option<Vec<PathBuf>>,
    pub build_directory: Option<PathBuf>,
    pub staging_directory: Option<PathBuf>,
    #[serde(rename = "removeMetaDataFiles")]
    pub remove_metadata_files: Option<bool>,
    pub gpg_sign: Option<bool>,
    pub passphrase: Option<String>,
    pub gpg_executable: Option<String>,
    pub gpg_key_name: Option<String>,
    pub gpg_timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Reads and parses `path`, resolving relative paths against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text).map_err(|source| BundlerError::Config {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or(Path::new(""));
        Ok(config.resolve_paths(base))
    }

    fn resolve_paths(mut self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };

        self.pom_file = self.pom_file.map(resolve);
        self.build_directory = self.build_directory.map(resolve);
        self.staging_directory = self.staging_directory.map(resolve);
        self.artifact_files = self
            .artifact_files
            .map(|files| files.into_iter().map(resolve).collect());
        self
    }
}
