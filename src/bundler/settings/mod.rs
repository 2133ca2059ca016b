//! Configuration structures for bundle assembly.
//!
//! [`Settings`] is a plain value handed to the pipeline; the CLI builds it from
//! arguments and an optional config file, library callers through
//! [`SettingsBuilder`].

mod builder;
mod core;
mod signing;

pub use builder::{DEFAULT_BUILD_DIRECTORY, SettingsBuilder};
pub use self::core::{BUNDLE_DIR_NAME, BUNDLE_FILE_NAME, METADATA_FILE_NAME, STAGING_DIR_NAME, Settings};
pub use signing::{DEFAULT_GPG_EXECUTABLE, SigningSettings};
