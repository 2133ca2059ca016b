//! Maven Central bundle builder.
//!
//! This library assembles the single zip file Maven Central's publisher
//! portal accepts for upload:
//! - stages a POM and its artifacts in Maven repository layout
//! - signs each staged file with a detached, ASCII-armored GPG signature
//! - writes MD5, SHA-1 and SHA-256 checksum files
//! - prunes transient staging metadata
//! - archives the tree reproducibly
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
