//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, and the merge of
//! arguments over an optional config file into bundler [`Settings`].

use super::config::ConfigFile;
use crate::bundler::{DEFAULT_GPG_EXECUTABLE, Settings, SettingsBuilder, SigningSettings};
use crate::error::{CliError, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Maven Central bundle builder
#[derive(Parser, Debug, Default)]
#[command(
    name = "central_bundle",
    version,
    about = "Builds a signed, checksummed Maven Central upload bundle",
    long_about = "Stages a POM and its artifacts in Maven repository layout, signs each file with GPG,
writes MD5/SHA-1/SHA-256 checksums, removes transient staging metadata and zips the result
into <build-directory>/central-publishing/central-bundle.zip.

Usage:
  central_bundle --pom-file pom.xml --artifact target/widget-1.0.0.jar
  central_bundle -p pom.xml -a widget.jar -a widget-sources.jar --gpg-sign false
  central_bundle --config central-bundle.toml

Exit code 0 = bundle guaranteed to exist at the output path."
)]
pub struct Args {
    /// POM descriptor providing groupId, artifactId and version
    #[arg(short = 'p', long, value_name = "FILE")]
    pub pom_file: Option<PathBuf>,

    /// Artifact to include; repeat for several, processed in the order given
    #[arg(short = 'a', long = "artifact", value_name = "FILE")]
    pub artifact_files: Vec<PathBuf>,

    /// Build output directory [default: target]
    #[arg(short = 'b', long, value_name = "DIR")]
    pub build_directory: Option<PathBuf>,

    /// Staging tree root [default: <build-directory>/central-staging]
    #[arg(long, value_name = "DIR")]
    pub staging_directory: Option<PathBuf>,

    /// Delete maven-metadata-central-staging.xml files before archiving [default: true]
    #[arg(long, value_name = "BOOL")]
    pub remove_metadata_files: Option<bool>,

    /// Sign staged files with GPG [default: true]
    #[arg(long, value_name = "BOOL")]
    pub gpg_sign: Option<bool>,

    /// Passphrase for the signing key; enables non-interactive batch mode
    #[arg(long, env = "GPG_PASSPHRASE", hide_env_values = true)]
    pub passphrase: Option<String>,

    /// Signing executable [default: gpg]
    #[arg(long, env = "GPG_EXECUTABLE", value_name = "PROGRAM")]
    pub gpg_executable: Option<String>,

    /// Key to sign with (passed as --local-user)
    #[arg(long, env = "GPG_KEYNAME", value_name = "KEY")]
    pub gpg_key_name: Option<String>,

    /// Abort signing a single file after this many seconds
    #[arg(long, value_name = "SECS")]
    pub gpg_timeout: Option<u64>,

    /// TOML config file; command line arguments take precedence
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the bundle report as JSON
    #[arg(long)]
    pub json: bool,

    /// Suppress the summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.gpg_timeout == Some(0) {
            return Err("--gpg-timeout must be at least 1 second".to_string());
        }

        if self.json && self.quiet {
            return Err("--json and --quiet cannot be combined".to_string());
        }

        Ok(())
    }

    /// Merges these arguments over `config` into bundler settings.
    ///
    /// # Errors
    ///
    /// Fails when neither source names a POM file.
    pub fn to_settings(&self, config: ConfigFile) -> Result<Settings> {
        let pom_file = self
            .pom_file
            .clone()
            .or(config.pom_file)
            .ok_or_else(|| CliError::MissingArgument {
                argument: "--pom-file".to_string(),
            })?;

        let artifact_files = if self.artifact_files.is_empty() {
            config.artifact_files.unwrap_or_default()
        } else {
            self.artifact_files.clone()
        };

        let gpg_timeout = self.gpg_timeout.or(config.gpg_timeout_secs);
        if gpg_timeout == Some(0) {
            return Err(CliError::InvalidArguments {
                reason: "gpgTimeoutSecs must be at least 1 second".to_string(),
            }
            .into());
        }

        let signing = SigningSettings {
            enabled: self.gpg_sign.or(config.gpg_sign).unwrap_or(true),
            passphrase: self.passphrase.clone().or(config.passphrase),
            executable: self
                .gpg_executable
                .clone()
                .or(config.gpg_executable)
                .unwrap_or_else(|| DEFAULT_GPG_EXECUTABLE.to_string()),
            key_name: self.gpg_key_name.clone().or(config.gpg_key_name),
            timeout: gpg_timeout.map(Duration::from_secs),
        };

        let mut builder = SettingsBuilder::new()
            .pom_file(pom_file)
            .artifact_files(artifact_files)
            .remove_metadata_files(
                self.remove_metadata_files
                    .or(config.remove_metadata_files)
                    .unwrap_or(true),
            )
            .signing(signing);

        if let Some(dir) = self.build_directory.clone().or(config.build_directory) {
            builder = builder.build_directory(dir);
        }
        if let Some(dir) = self.staging_directory.clone().or(config.staging_directory) {
            builder = builder.staging_directory(dir);
        }

        Ok(builder.build()?)
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(
            !args.json, // Summary only when not emitting JSON
            args.quiet,
        );

        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn parses_repeated_artifacts_in_order() {
        let args = Args::try_parse_from([
            "central_bundle",
            "-p",
            "pom.xml",
            "-a",
            "b.jar",
            "--artifact",
            "a.jar",
            "--gpg-sign",
            "false",
        ])
        .unwrap();

        assert_eq!(args.artifact_files, vec![PathBuf::from("b.jar"), PathBuf::from("a.jar")]);
        assert_eq!(args.gpg_sign, Some(false));
        assert_eq!(args.remove_metadata_files, None);
    }

    #[test]
    fn arguments_override_config_file() {
        let args = Args {
            pom_file: Some("cli.pom".into()),
            gpg_sign: Some(false),
            ..Default::default()
        };
        let config = ConfigFile {
            pom_file: Some("config.pom".into()),
            artifact_files: Some(vec!["from-config.jar".into()]),
            build_directory: Some("out".into()),
            remove_metadata_files: Some(false),
            gpg_sign: Some(true),
            gpg_timeout_secs: Some(30),
            ..Default::default()
        };

        let settings = args.to_settings(config).unwrap();

        assert_eq!(settings.pom_file(), Path::new("cli.pom"));
        assert_eq!(settings.artifact_files(), &[PathBuf::from("from-config.jar")]);
        assert_eq!(settings.staging_directory(), Path::new("out/central-staging"));
        assert!(!settings.remove_metadata_files());
        assert!(!settings.signing().enabled);
        assert_eq!(settings.signing().timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn defaults_apply_without_config() {
        let args = Args {
            pom_file: Some("pom.xml".into()),
            ..Default::default()
        };
        let settings = args.to_settings(ConfigFile::default()).unwrap();

        assert!(settings.signing().enabled);
        assert!(settings.remove_metadata_files());
        assert_eq!(settings.signing().executable, "gpg");
        assert_eq!(settings.build_directory(), Path::new("target"));
    }

    #[test]
    fn missing_pom_is_reported() {
        let err = Args::default().to_settings(ConfigFile::default()).unwrap_err();
        assert!(err.to_string().contains("--pom-file"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let args = Args {
            gpg_timeout: Some(0),
            ..Default::default()
        };
        assert!(args.validate().is_err());
    }
}
