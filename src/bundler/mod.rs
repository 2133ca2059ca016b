//! Maven Central bundle assembly.
//!
//! Turns a POM and a list of artifact files into
//! `<build>/central-publishing/central-bundle.zip`, laid out as a Maven
//! repository with detached signatures and checksum files.
//!
//! # Integration
//!
//! ```no_run
//! use central_bundler::bundler::{Bundler, SettingsBuilder, SigningSettings};
//!
//! # async fn example() -> central_bundler::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .pom_file("pom.xml")
//!     .artifact_file("target/widget-1.0.0.jar")
//!     .artifact_file("target/widget-1.0.0-sources.jar")
//!     .signing(SigningSettings {
//!         passphrase: std::env::var("GPG_PASSPHRASE").ok(),
//!         ..Default::default()
//!     })
//!     .build()?;
//!
//! let bundle = Bundler::new(settings)?.bundle().await?;
//! for artifact in &bundle.artifacts {
//!     println!("{}", artifact.path.display());
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
pub mod error;
mod settings;
pub(crate) mod utils;

pub use builder::{
    Bundler,
    archive::{ArchiveWriter, ZipArchiveWriter},
    checksum::{ChecksumAlgorithm, Sidecars},
    signing::{GpgSigner, Signer, signature_path},
};
pub use error::{Error, Result, SigningFailure};
pub use settings::{
    BUNDLE_DIR_NAME, BUNDLE_FILE_NAME, DEFAULT_BUILD_DIRECTORY, DEFAULT_GPG_EXECUTABLE,
    METADATA_FILE_NAME, STAGING_DIR_NAME, Settings, SettingsBuilder, SigningSettings,
};

use crate::metadata::Coordinate;
use serde::Serialize;
use std::path::PathBuf;

/// Result of a successful bundle run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CentralBundle {
    /// Coordinate read from the POM.
    pub coordinate: Coordinate,

    /// The written archive.
    pub archive_path: PathBuf,

    /// Staged files in processing order: the POM first, then each artifact.
    pub artifacts: Vec<StagedArtifact>,

    /// Metadata files deleted before archiving.
    pub pruned: Vec<PathBuf>,
}

/// One file placed in the staging tree, with everything derived from it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedArtifact {
    /// Location inside the staging tree.
    pub path: PathBuf,

    /// Detached signature, when signing produced one.
    pub signature: Option<PathBuf>,

    /// Checksum files for the staged file, then for its signature.
    pub checksums: Vec<PathBuf>,
}
