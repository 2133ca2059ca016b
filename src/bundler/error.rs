//! Error types for the bundle assembly pipeline.
//!
//! Every pipeline stage has its own variant so callers can tell which step
//! failed. All of them are fatal: the first error aborts the run and nothing
//! that was already written to the staging tree is rolled back.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

/// Result type alias for bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while assembling a bundle.
#[derive(Error, Debug)]
pub enum Error {
    /// The POM lacks one or more of groupId, artifactId, version.
    #[error(
        "POM file {} must contain groupId, artifactId, and version (missing: {})",
        path.display(),
        missing.join(", ")
    )]
    MissingCoordinate {
        /// Descriptor that was read
        path: PathBuf,
        /// Names of the absent or empty fields
        missing: Vec<&'static str>,
    },

    /// The POM could not be read or is not well-formed XML.
    #[error("failed to read POM file {}: {reason}", path.display())]
    DescriptorParse {
        /// Descriptor that was read
        path: PathBuf,
        /// Reader or parser message
        reason: String,
    },

    /// Filesystem failure while laying out the staging tree.
    #[error("staging failed while {action} {}: {source}", path.display())]
    StagingIo {
        /// What the stager was doing
        action: &'static str,
        /// File or directory involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The external signing tool failed for a staged file.
    #[error("failed to sign file {}: {failure}", path.display())]
    Signing {
        /// File that was being signed
        path: PathBuf,
        /// How signing failed
        #[source]
        failure: SigningFailure,
    },

    /// A checksum target could not be read or a checksum file not written.
    #[error("failed to generate checksums for {}: {source}", path.display())]
    Checksum {
        /// Target file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A metadata file could not be listed or deleted.
    #[error("failed to prune metadata file {}: {source}", path.display())]
    PruneIo {
        /// File or directory involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The bundle archive could not be written.
    #[error("failed to write bundle {}: {source}", path.display())]
    ArchiveWrite {
        /// Archive being written
        path: PathBuf,
        /// Underlying zip or I/O error
        #[source]
        source: zip::result::ZipError,
    },

    /// Settings validation and other errors without a dedicated stage.
    #[error("{0}")]
    GenericError(String),
}

/// Reasons the signing tool did not produce a signature.
#[derive(Error, Debug)]
pub enum SigningFailure {
    /// The executable is not on the search path.
    #[error("signing tool '{0}' was not found in PATH")]
    ToolNotFound(String),

    /// The process could not be started or waited on.
    #[error("could not run signing tool: {0}")]
    Launch(#[source] std::io::Error),

    /// A previous signature could not be removed before signing.
    #[error("could not remove stale signature: {0}")]
    StaleSignature(#[source] std::io::Error),

    /// The process exited unsuccessfully. `None` when terminated by a signal.
    #[error("{}", exit_message(*.0))]
    ExitStatus(Option<i32>),

    /// The process outlived the configured timeout and was killed.
    #[error("GPG signing timed out after {} seconds", .0.as_secs())]
    TimedOut(Duration),
}

fn exit_message(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("GPG signing failed with exit code: {code}"),
        None => "GPG signing was terminated by a signal".to_string(),
    }
}

/// Attaches pipeline-stage context to I/O results.
pub trait ErrorExt<T> {
    /// Marks the error as a staging failure.
    fn staging_context(self, action: &'static str, path: &Path) -> Result<T>;

    /// Marks the error as a checksum failure.
    fn checksum_context(self, path: &Path) -> Result<T>;

    /// Marks the error as a pruning failure.
    fn prune_context(self, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn staging_context(self, action: &'static str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::StagingIo {
            action,
            path: path.to_path_buf(),
            source,
        })
    }

    fn checksum_context(self, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Checksum {
            path: path.to_path_buf(),
            source,
        })
    }

    fn prune_context(self, path: &Path) -> Result<T> {
        self.map_err(|source| Error::PruneIo {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Converts an absent value into a [`Error::GenericError`].
pub trait Context<T> {
    /// Returns the value or an error carrying `msg`.
    fn context(self, msg: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_coordinate_lists_fields() {
        let err = Error::MissingCoordinate {
            path: PathBuf::from("pom.xml"),
            missing: vec!["groupId", "version"],
        };
        let msg = err.to_string();
        assert!(msg.contains("pom.xml"));
        assert!(msg.contains("groupId, version"));
    }

    #[test]
    fn signing_error_carries_exit_code() {
        let err = Error::Signing {
            path: PathBuf::from("widget.jar"),
            failure: SigningFailure::ExitStatus(Some(2)),
        };
        assert!(err.to_string().contains("exit code: 2"));
    }

    #[test]
    fn signing_error_chains_launch_cause() {
        use std::error::Error as _;

        let err = Error::Signing {
            path: PathBuf::from("widget.jar"),
            failure: SigningFailure::Launch(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )),
        };

        let failure = err.source().unwrap();
        assert!(failure.to_string().starts_with("could not run signing tool"));
        let cause = failure.source().unwrap();
        assert_eq!(cause.to_string(), "denied");
    }

    #[test]
    fn signal_termination_has_its_own_message() {
        let failure = SigningFailure::ExitStatus(None);
        assert_eq!(failure.to_string(), "GPG signing was terminated by a signal");
    }

    #[test]
    fn io_context_maps_to_stage_variant() {
        let result: std::result::Result<(), _> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = result.prune_context(Path::new("a/b")).unwrap_err();
        assert!(matches!(err, Error::PruneIo { .. }));
    }

    #[test]
    fn option_context_produces_generic_error() {
        let value: Option<u8> = None;
        let err = value.context("pom_file is required").unwrap_err();
        assert_eq!(err.to_string(), "pom_file is required");
    }
}
