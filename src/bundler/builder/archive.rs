//! Bundle archive writing.
//!
//! [`ArchiveWriter`] adds a whole directory tree to a new archive file;
//! [`ZipArchiveWriter`] is the zip implementation used for Central bundles.
//! Output is reproducible: entries are sorted, timestamps pinned to the DOS
//! epoch and permissions normalized, so identical trees give identical bytes.

use crate::bundler::{Error, Result};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Component, Path},
};
use zip::{
    CompressionMethod, DateTime, ZipWriter,
    result::ZipError,
    write::SimpleFileOptions,
};

/// Writes a directory tree into a single archive file.
pub trait ArchiveWriter: Send + Sync + 'static {
    /// Creates `destination` holding everything under `root`.
    ///
    /// With `include_root_folder` false, entry names are relative to `root`;
    /// otherwise they are prefixed with `root`'s own directory name.
    /// Returns the number of file entries written.
    fn write_tree(&self, root: &Path, destination: &Path, include_root_folder: bool)
    -> Result<usize>;
}

/// Zip archive writer.
#[derive(Debug, Clone)]
pub struct ZipArchiveWriter {
    compression: CompressionMethod,
}

impl Default for ZipArchiveWriter {
    fn default() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }
}

impl ZipArchiveWriter {
    /// Creates a writer using `compression` for file entries.
    pub fn with_compression(compression: CompressionMethod) -> Self {
        Self { compression }
    }

    fn write_entries(
        &self,
        root: &Path,
        destination: &Path,
        include_root_folder: bool,
    ) -> std::result::Result<usize, ZipError> {
        let prefix = match (include_root_folder, root.file_name()) {
            (true, Some(name)) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        };

        let file_options = SimpleFileOptions::default()
            .compression_method(self.compression)
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);
        let dir_options = SimpleFileOptions::default()
            .last_modified_time(DateTime::default())
            .unix_permissions(0o755);

        let mut zip = ZipWriter::new(BufWriter::new(File::create(destination)?));
        let destination = destination.canonicalize()?;
        let mut files = 0;

        if let Some(prefix) = &prefix {
            zip.add_directory(format!("{prefix}/"), dir_options)?;
        }

        for entry in walkdir::WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            let relative = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            let name = entry_name(prefix.as_deref(), relative);

            if entry.file_type().is_dir() {
                zip.add_directory(format!("{name}/"), dir_options)?;
            } else if entry.file_type().is_file() {
                if entry.path().canonicalize()? == destination {
                    continue;
                }
                zip.start_file(name, file_options)?;
                let mut source = File::open(entry.path())?;
                io::copy(&mut source, &mut zip)?;
                files += 1;
            } else {
                log::warn!("Skipping non-regular file {}", entry.path().display());
            }
        }

        zip.finish()?.flush()?;
        Ok(files)
    }
}

impl ArchiveWriter for ZipArchiveWriter {
    fn write_tree(
        &self,
        root: &Path,
        destination: &Path,
        include_root_folder: bool,
    ) -> Result<usize> {
        self.write_entries(root, destination, include_root_folder)
            .map_err(|source| Error::ArchiveWrite {
                path: destination.to_path_buf(),
                source,
            })
    }
}

/// Zip entry name for `relative`: components joined by `/`, optionally prefixed.
fn entry_name(prefix: Option<&str>, relative: &Path) -> String {
    let components = relative.components().filter_map(|c| match c {
        Component::Normal(part) => Some(part.to_string_lossy()),
        _ => None,
    });

    let mut name = prefix.map(str::to_string).unwrap_or_default();
    for part in components {
        if !name.is_empty() {
            name.push('/');
        }
        name.push_str(&part);
    }
    name
}
