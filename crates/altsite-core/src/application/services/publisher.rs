//! Publisher - stage three of the pipeline.
//!
//! Walks the staging tree in sorted order and uploads every file over a
//! single remote session. Remote directories are created lazily, one
//! segment at a time, as uploads require them.
//!
//! Failure handling splits two ways: a failed login or dropped connection
//! aborts the run, while any per-file failure (a rejected upload, a
//! directory that cannot be created) is recorded in the report and the
//! remaining files still get their attempt.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{Filesystem, RemoteStore},
    error::{AltsiteError, AltsiteResult},
};

// ── Report types ──────────────────────────────────────────────────────────────

/// One file that could not be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub remote_path: String,
    pub reason: String,
}

/// Outcome of the publishing phase.
#[derive(Debug, Clone, Default)]
pub struct PublishReport {
    pub attempted: usize,
    pub uploaded: usize,
    pub failures: Vec<UploadFailure>,
}

impl PublishReport {
    pub fn all_uploaded(&self) -> bool {
        self.failures.is_empty()
    }
}

// ── Publisher ─────────────────────────────────────────────────────────────────

/// Uploads a staged tree to a remote base directory.
pub struct Publisher<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> Publisher<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Upload every file under `staging_root` to `remote_base`, preserving
    /// relative paths. The client must already be logged in.
    #[instrument(skip_all, fields(remote_base = %remote_base))]
    pub fn publish(
        &self,
        staging_root: &Path,
        remote_base: &str,
        client: &mut dyn RemoteStore,
    ) -> AltsiteResult<PublishReport> {
        let files = self.fs.walk_files(staging_root)?;
        let mut report = PublishReport {
            attempted: files.len(),
            ..Default::default()
        };

        for relative in &files {
            let remote_path = join_remote(remote_base, relative);
            match self.upload_one(staging_root, relative, &remote_path, client) {
                Ok(()) => {
                    debug!(%remote_path, "uploaded");
                    report.uploaded += 1;
                }
                Err(e) if e.is_connection_failure() => return Err(e),
                Err(e) => {
                    warn!(%remote_path, error = %e, "upload failed, continuing");
                    report.failures.push(UploadFailure {
                        remote_path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            uploaded = report.uploaded,
            attempted = report.attempted,
            "publishing finished"
        );
        Ok(report)
    }

    fn upload_one(
        &self,
        staging_root: &Path,
        relative: &Path,
        remote_path: &str,
        client: &mut dyn RemoteStore,
    ) -> AltsiteResult<()> {
        let remote_dir = match remote_path.rsplit_once('/') {
            Some((dir, _)) => dir,
            None => "",
        };
        ensure_remote_directory(client, remote_dir)?;

        let filename = relative
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AltsiteError::Internal {
                message: format!("staged path has no file name: {}", relative.display()),
            })?;
        let bytes = self.fs.read(&staging_root.join(relative))?;
        client.store_file(filename, &bytes)
    }
}

/// Join a remote base and a staged relative path with `/` separators.
fn join_remote(remote_base: &str, relative: &Path) -> String {
    let mut out = remote_base.trim_end_matches('/').to_string();
    for component in relative.components() {
        out.push('/');
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    out
}

/// Walk into `path` from the store root, creating any segment that cannot
/// be entered.
///
/// For each segment: try to enter it; if that fails, create it and try to
/// enter again. Failure of that second attempt propagates, since a
/// directory that can be neither entered nor created makes every upload
/// beneath it pointless.
pub fn ensure_remote_directory(client: &mut dyn RemoteStore, path: &str) -> AltsiteResult<()> {
    client.change_directory("/")?;
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if client.change_directory(segment).is_err() {
            client.create_directory(segment)?;
            client.change_directory(segment)?;
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
