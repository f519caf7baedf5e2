//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `altsite-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::error::AltsiteResult;

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Port for local filesystem operations.
///
/// Implemented by:
/// - `altsite_adapters::filesystem::LocalFilesystem` (production)
/// - `altsite_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Probing methods (`exists`, `is_dir`) are infallible; a path that cannot
///   be inspected is reported as absent.
/// - `walk_files` returns root-relative paths in sorted order, so upload
///   order is deterministic for a given staging tree.
pub trait Filesystem: Send + Sync {
    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// List the immediate children of a directory.
    fn list_dir(&self, path: &Path) -> AltsiteResult<Vec<DirEntry>>;

    /// Read a file's bytes.
    fn read(&self, path: &Path) -> AltsiteResult<Vec<u8>>;

    /// Write bytes to a file, creating it if absent.
    fn write(&self, path: &Path, bytes: &[u8]) -> AltsiteResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> AltsiteResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> AltsiteResult<()>;

    /// Size of a file in bytes.
    fn file_size(&self, path: &Path) -> AltsiteResult<u64>;

    /// Every file under `root`, as root-relative paths, sorted.
    fn walk_files(&self, root: &Path) -> AltsiteResult<Vec<PathBuf>>;
}

/// Port for the remote file-store session.
///
/// Implemented by:
/// - `altsite_adapters::remote::FtpRemote` (production, FTP)
/// - `altsite_adapters::remote::MemoryRemote` (testing, with failure
///   injection)
///
/// ## Error contract
///
/// `login` failures must map to `ApplicationError::ConnectionFailed` (fatal
/// to the publishing phase). Per-path failures (`change_directory` on an
/// absent path, denied `create_directory`, a rejected `store_file`) map to
/// `ApplicationError::Remote` and are recoverable: the publisher abandons
/// the affected file and continues.
///
/// Transport details (plaintext vs. encrypted control channel, timeouts)
/// are the adapter's concern.
pub trait RemoteStore: Send {
    /// Authenticate against the remote host. Called exactly once per run,
    /// before any other operation.
    fn login(&mut self, host: &str, user: &str, secret: &str) -> AltsiteResult<()>;

    /// Enter a directory. `/` resets to the store root. Fails if the path
    /// does not exist.
    fn change_directory(&mut self, path: &str) -> AltsiteResult<()>;

    /// Create a directory relative to the current one.
    fn create_directory(&mut self, name: &str) -> AltsiteResult<()>;

    /// Store bytes under `filename` in the current directory.
    fn store_file(&mut self, filename: &str, bytes: &[u8]) -> AltsiteResult<()>;

    /// Delete the file at `path`.
    fn delete_file(&mut self, path: &str) -> AltsiteResult<()>;

    /// End the session. Errors here are worth logging but never fatal.
    fn close(&mut self) -> AltsiteResult<()>;
}
