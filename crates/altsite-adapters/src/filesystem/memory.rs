//! In-memory filesystem for testing.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use altsite_core::{
    application::{
        ApplicationError,
        ports::{DirEntry, Filesystem},
    },
    error::AltsiteResult,
};

/// Test double that keeps all files in memory.
///
/// Interior mutability via `RwLock` lets it back a `&dyn Filesystem` while
/// tests keep a shared handle for assertions.
#[derive(Debug, Default)]
pub struct MemoryFilesystem {
    files: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
    dirs: RwLock<BTreeSet<PathBuf>>,
    unreadable: RwLock<BTreeSet<PathBuf>>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating all parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>, bytes: &[u8]) {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            self.add_dir_chain(parent);
        }
        self.files.write().unwrap().insert(path, bytes.to_vec());
    }

    /// Seed an empty directory.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.add_dir_chain(path.as_ref());
    }

    /// Make subsequent `read` calls on `path` fail.
    pub fn make_unreadable(&self, path: impl AsRef<Path>) {
        self.unreadable
            .write()
            .unwrap()
            .insert(path.as_ref().to_path_buf());
    }

    /// Current content of a file, if present.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.read().unwrap().get(path.as_ref()).cloned()
    }

    /// Every file path currently stored, sorted.
    pub fn file_paths(&self) -> Vec<PathBuf> {
        self.files.read().unwrap().keys().cloned().collect()
    }

    fn add_dir_chain(&self, path: &Path) {
        let mut dirs = self.dirs.write().unwrap();
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            dirs.insert(current.clone());
        }
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path) || self.dirs.read().unwrap().contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.read().unwrap().contains(path)
    }

    fn list_dir(&self, path: &Path) -> AltsiteResult<Vec<DirEntry>> {
        if !self.is_dir(path) {
            return Err(ApplicationError::Filesystem {
                path: path.to_path_buf(),
                reason: "not a directory".into(),
            }
            .into());
        }
        let mut entries = Vec::new();
        for dir in self.dirs.read().unwrap().iter() {
            if dir.parent() == Some(path)
                && let Some(name) = dir.file_name()
            {
                entries.push(DirEntry {
                    name: name.to_string_lossy().into_owned(),
                    is_dir: true,
                });
            }
        }
        for file in self.files.read().unwrap().keys() {
            if file.parent() == Some(path)
                && let Some(name) = file.file_name()
            {
                entries.push(DirEntry {
                    name: name.to_string_lossy().into_owned(),
                    is_dir: false,
                });
            }
        }
        Ok(entries)
    }

    fn read(&self, path: &Path) -> AltsiteResult<Vec<u8>> {
        if self.unreadable.read().unwrap().contains(path) {
            return Err(ApplicationError::Filesystem {
                path: path.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into());
        }
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                ApplicationError::Filesystem {
                    path: path.to_path_buf(),
                    reason: "no such file".into(),
                }
                .into()
            })
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> AltsiteResult<()> {
        if let Some(parent) = path.parent() {
            self.add_dir_chain(parent);
        }
        self.files
            .write()
            .unwrap()
            .insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> AltsiteResult<()> {
        self.add_dir_chain(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> AltsiteResult<()> {
        self.dirs.write().unwrap().retain(|d| !d.starts_with(path));
        self.files
            .write()
            .unwrap()
            .retain(|f, _| !f.starts_with(path));
        Ok(())
    }

    fn file_size(&self, path: &Path) -> AltsiteResult<u64> {
        self.read(path).map(|b| b.len() as u64)
    }

    fn walk_files(&self, root: &Path) -> AltsiteResult<Vec<PathBuf>> {
        Ok(self
            .files
            .read()
            .unwrap()
            .keys()
            .filter_map(|p| p.strip_prefix(root).ok().map(Path::to_path_buf))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parents_spring_into_existence() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/a/b/c.txt", b"x");

        assert!(fs.is_dir(Path::new("/a")));
        assert!(fs.is_dir(Path::new("/a/b")));
        assert!(!fs.is_dir(Path::new("/a/b/c.txt")));
        assert!(fs.exists(Path::new("/a/b/c.txt")));
    }

    #[test]
    fn walk_files_strips_root() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/stage/x/y.txt", b"x");
        fs.add_file("/other/z.txt", b"x");

        assert_eq!(
            fs.walk_files(Path::new("/stage")).unwrap(),
            vec![PathBuf::from("x/y.txt")]
        );
    }

    #[test]
    fn unreadable_paths_error_on_read() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/secret.txt", b"x");
        fs.make_unreadable("/secret.txt");

        assert!(fs.read(Path::new("/secret.txt")).is_err());
        assert!(fs.exists(Path::new("/secret.txt")));
    }
}
