//! Bundle pipeline stages and their orchestration.
//!
//! This module provides the [`Bundler`] orchestrator that runs the stages in
//! order to turn a POM and its artifacts into a Central upload bundle.
//!
//! # Module Organization
//!
//! - [`staging`] - repository layout and file copying
//! - [`signing`] - detached signatures via an external tool
//! - [`checksum`] - MD5 / SHA-1 / SHA-256 sidecar files
//! - [`prune`] - removal of transient metadata files
//! - [`archive`] - deterministic zip writing
//! - [`tool_detection`] - external tool availability checking
//! - [`orchestrator`] - main [`Bundler`] struct

pub mod archive;
pub mod checksum;
mod orchestrator;
pub mod prune;
pub mod signing;
pub mod staging;
mod tool_detection;

pub use orchestrator::Bundler;
