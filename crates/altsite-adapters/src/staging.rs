//! Run-scoped staging directory.
//!
//! Wraps a temporary directory whose lifetime is the deployment run: it is
//! removed on drop unless the caller asks to keep it for inspection.

use std::path::{Path, PathBuf};

use altsite_core::error::{AltsiteError, AltsiteResult};
use tempfile::TempDir;
use tracing::debug;

/// A freshly created staging directory, deleted on drop.
#[derive(Debug)]
pub struct StagingArea {
    dir: TempDir,
}

impl StagingArea {
    /// Create a new staging directory under the system temp location.
    pub fn create() -> AltsiteResult<Self> {
        let dir = TempDir::with_prefix("altsite-staging-").map_err(|e| AltsiteError::Internal {
            message: format!("cannot create staging directory: {e}"),
        })?;
        debug!(path = %dir.path().display(), "staging area created");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Disarm cleanup and hand the directory over to the caller.
    pub fn keep(self) -> PathBuf {
        self.dir.keep()
    }
}
