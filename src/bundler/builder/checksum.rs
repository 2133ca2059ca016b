//! Checksum sidecar generation.
//!
//! Every staged file, and its `.asc` signature when one exists, gets an MD5,
//! SHA-1 and SHA-256 digest written next to it as bare lowercase hex with no
//! trailing newline, which is the form Maven repositories expect.

use crate::bundler::{Result, error::ErrorExt};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use super::signing::signature_path;

/// Digest algorithms written for every target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumAlgorithm {
    /// 128-bit MD5, `.md5`
    Md5,
    /// 160-bit SHA-1, `.sha1`
    Sha1,
    /// 256-bit SHA-256, `.sha256`
    Sha256,
}

impl ChecksumAlgorithm {
    /// All algorithms, in the order their files are written.
    pub const ALL: [Self; 3] = [Self::Md5, Self::Sha1, Self::Sha256];

    /// Standard algorithm name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
        }
    }

    /// Extension appended to the target's file name, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
        }
    }

    /// Length of the hex rendering: twice the digest's byte length.
    pub fn hex_len(self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha1 => 40,
            Self::Sha256 => 64,
        }
    }

    /// Lowercase hex digest of `content`.
    pub fn digest_hex(self, content: &[u8]) -> String {
        match self {
            Self::Md5 => format!("{:x}", md5::compute(content)),
            Self::Sha1 => hex::encode(Sha1::digest(content)),
            Self::Sha256 => hex::encode(Sha256::digest(content)),
        }
    }
}

impl std::fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Path of the checksum file for `target`: `<target>.<ext>`.
pub fn checksum_path(target: &Path, algorithm: ChecksumAlgorithm) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(".");
    name.push(algorithm.extension());
    PathBuf::from(name)
}

/// Checksum file paths for `target`, one per algorithm.
pub fn checksum_paths(target: &Path) -> Vec<PathBuf> {
    ChecksumAlgorithm::ALL
        .iter()
        .map(|algorithm| checksum_path(target, *algorithm))
        .collect()
}

/// Writes checksum files for `target`, reading its content once.
///
/// # Returns
///
/// The written checksum paths in [`ChecksumAlgorithm::ALL`] order.
pub async fn write_checksums(target: &Path) -> Result<Vec<PathBuf>> {
    let content = tokio::fs::read(target).await.checksum_context(target)?;

    let mut written = Vec::with_capacity(ChecksumAlgorithm::ALL.len());
    for algorithm in ChecksumAlgorithm::ALL {
        let path = checksum_path(target, algorithm);
        tokio::fs::write(&path, algorithm.digest_hex(&content))
            .await
            .checksum_context(&path)?;
        written.push(path);
    }

    log::debug!(
        "Generated checksums for: {}",
        target.file_name().unwrap_or_default().to_string_lossy()
    );
    Ok(written)
}

/// Sidecar files written next to a staged file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidecars {
    /// The detached signature, when the file was signed
    pub signature: Option<PathBuf>,

    /// Checksum files of the staged file, then of its signature
    pub checksums: Vec<PathBuf>,
}

/// Writes checksums for a staged file and then, if present, its signature.
///
/// A missing signature is not an error; signing may be disabled.
pub async fn generate_checksums(staged_file: &Path) -> Result<Sidecars> {
    let mut checksums = write_checksums(staged_file).await?;

    let signature = signature_path(staged_file);
    let signature = if tokio::fs::try_exists(&signature)
        .await
        .checksum_context(&signature)?
    {
        checksums.extend(write_checksums(&signature).await?);
        Some(signature)
    } else {
        None
    };

    Ok(Sidecars {
        signature,
        checksums,
    })
}
