//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use altsite_core::{
    application::ports::{DirEntry, Filesystem},
    error::AltsiteResult,
};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, path: &Path) -> AltsiteResult<Vec<DirEntry>> {
        let mut entries = Vec::new();
        let iter = std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;
        for entry in iter {
            let entry = entry.map_err(|e| map_io_error(path, e, "read directory entry"))?;
            let file_type = entry
                .file_type()
                .map_err(|e| map_io_error(&entry.path(), e, "inspect entry"))?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: file_type.is_dir(),
            });
        }
        Ok(entries)
    }

    fn read(&self, path: &Path) -> AltsiteResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> AltsiteResult<()> {
        std::fs::write(path, bytes).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn create_dir_all(&self, path: &Path) -> AltsiteResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn remove_dir_all(&self, path: &Path) -> AltsiteResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn file_size(&self, path: &Path) -> AltsiteResult<u64> {
        std::fs::metadata(path)
            .map(|m| m.len())
            .map_err(|e| map_io_error(path, e, "get metadata"))
    }

    fn walk_files(&self, root: &Path) -> AltsiteResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        // sort_by_file_name gives a deterministic walk; still sort the
        // collected relative paths so the contract holds regardless.
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                map_io_error(&path, e.into(), "walk directory")
            })?;
            if entry.file_type().is_file()
                && let Ok(relative) = entry.path().strip_prefix(root)
            {
                files.push(relative.to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> altsite_core::error::AltsiteError {
    use altsite_core::application::ApplicationError;

    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
