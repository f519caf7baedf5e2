//! Infrastructure adapters for altsite.
//!
//! This crate implements the ports defined in
//! `altsite-core::application::ports`. It contains all external dependencies
//! and I/O operations: the real filesystem, the FTP client, the temporary
//! staging area, and in-memory doubles for tests.

pub mod filesystem;
pub mod remote;
pub mod staging;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use remote::{FtpRemote, MemoryRemote};
pub use staging::StagingArea;
