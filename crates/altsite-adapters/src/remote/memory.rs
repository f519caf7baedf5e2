//! In-memory remote store for testing.

use std::collections::{BTreeMap, BTreeSet};

use altsite_core::{
    application::{ApplicationError, ports::RemoteStore},
    error::{AltsiteError, AltsiteResult},
};

/// Test double that models the remote store as an in-memory tree with a
/// session cursor, plus failure injection knobs.
#[derive(Debug, Default)]
pub struct MemoryRemote {
    logged_in: bool,
    closed: bool,
    cwd: Vec<String>,
    dirs: BTreeSet<String>,
    files: BTreeMap<String, Vec<u8>>,
    fail_login: bool,
    deny_directories: BTreeSet<String>,
    fail_uploads: BTreeSet<String>,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `login` fail with a connection error.
    pub fn fail_login(&mut self) {
        self.fail_login = true;
    }

    /// Deny creation of a specific directory (full path from the root).
    pub fn deny_directory(&mut self, path: impl Into<String>) {
        self.deny_directories.insert(path.into());
    }

    /// Reject the upload of a specific file (full path from the root).
    pub fn fail_upload(&mut self, path: impl Into<String>) {
        self.fail_uploads.insert(path.into());
    }

    /// Pre-create a directory so no `create_directory` is needed for it.
    pub fn seed_directory(&mut self, path: impl Into<String>) {
        self.dirs.insert(path.into());
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Content of an uploaded file, by full path.
    pub fn file_content(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Every uploaded path, sorted.
    pub fn uploaded_paths(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    fn require_session(&self) -> AltsiteResult<()> {
        if self.logged_in {
            Ok(())
        } else {
            Err(AltsiteError::Internal {
                message: "remote operation before login".into(),
            })
        }
    }

    fn child_path(&self, name: &str) -> String {
        if self.cwd.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.cwd.join("/"), name)
        }
    }
}

impl RemoteStore for MemoryRemote {
    fn login(&mut self, host: &str, _user: &str, _secret: &str) -> AltsiteResult<()> {
        if self.fail_login {
            return Err(ApplicationError::ConnectionFailed {
                host: host.to_string(),
                reason: "530 login incorrect".into(),
            }
            .into());
        }
        self.logged_in = true;
        Ok(())
    }

    fn change_directory(&mut self, path: &str) -> AltsiteResult<()> {
        self.require_session()?;
        if path == "/" {
            self.cwd.clear();
            return Ok(());
        }
        let full = self.child_path(path);
        if self.dirs.contains(&full) {
            self.cwd.push(path.to_string());
            Ok(())
        } else {
            Err(ApplicationError::Remote {
                path: full,
                reason: "550 no such directory".into(),
            }
            .into())
        }
    }

    fn create_directory(&mut self, name: &str) -> AltsiteResult<()> {
        self.require_session()?;
        let full = self.child_path(name);
        if self.deny_directories.contains(&full) {
            return Err(ApplicationError::Remote {
                path: full,
                reason: "550 permission denied".into(),
            }
            .into());
        }
        self.dirs.insert(full);
        Ok(())
    }

    fn store_file(&mut self, filename: &str, bytes: &[u8]) -> AltsiteResult<()> {
        self.require_session()?;
        let full = self.child_path(filename);
        if self.fail_uploads.contains(&full) {
            return Err(ApplicationError::Remote {
                path: full,
                reason: "552 upload rejected".into(),
            }
            .into());
        }
        self.files.insert(full, bytes.to_vec());
        Ok(())
    }

    fn delete_file(&mut self, path: &str) -> AltsiteResult<()> {
        self.require_session()?;
        if self.files.remove(path).is_some() {
            Ok(())
        } else {
            Err(ApplicationError::Remote {
                path: path.to_string(),
                reason: "550 no such file".into(),
            }
            .into())
        }
    }

    fn close(&mut self) -> AltsiteResult<()> {
        self.closed = true;
        self.logged_in = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_state_machine() {
        let mut remote = MemoryRemote::new();
        assert!(remote.change_directory("/").is_err());

        remote.login("ftp.example.net", "u", "p").unwrap();
        remote.create_directory("base").unwrap();
        remote.change_directory("base").unwrap();
        remote.store_file("a.txt", b"hello").unwrap();

        assert_eq!(remote.file_content("base/a.txt"), Some(&b"hello"[..]));
        remote.close().unwrap();
        assert!(remote.is_closed());
    }

    #[test]
    fn cwd_root_resets_cursor() {
        let mut remote = MemoryRemote::new();
        remote.login("h", "u", "p").unwrap();
        remote.create_directory("a").unwrap();
        remote.change_directory("a").unwrap();
        remote.change_directory("/").unwrap();
        remote.store_file("top.txt", b"x").unwrap();

        assert_eq!(remote.uploaded_paths(), vec!["top.txt".to_string()]);
    }

    #[test]
    fn failure_injection() {
        let mut remote = MemoryRemote::new();
        remote.fail_login();
        let err = remote.login("h", "u", "p").unwrap_err();
        assert!(err.is_connection_failure());

        let mut remote = MemoryRemote::new();
        remote.deny_directory("locked");
        remote.fail_upload("bad.txt");
        remote.login("h", "u", "p").unwrap();
        assert!(remote.create_directory("locked").is_err());
        assert!(remote.store_file("bad.txt", b"x").is_err());
        assert!(remote.store_file("good.txt", b"x").is_ok());
    }
}
