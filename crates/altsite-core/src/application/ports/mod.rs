//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `altsite-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by
//!   infrastructure
//!   - `Filesystem`: local file operations (workspace + staging area)
//!   - `RemoteStore`: the remote file-store session (FTP in production)
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by
//!   application (defined in the CLI layer, implemented by services)

pub mod output;

pub use output::{DirEntry, Filesystem, RemoteStore};
