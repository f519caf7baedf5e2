//! Component mappings: the declarative manifest of what gets deployed where.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── Component mapping ─────────────────────────────────────────────────────────

/// A declared correspondence between a local source path and a remote
/// destination path.
///
/// `source` is relative to the workspace root and may resolve to a single
/// file or a directory. `dest` is relative to the deployment root; the empty
/// string means "the deployment root itself". Mappings are configured once
/// and read in declaration order (order only affects log ordering).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMapping {
    pub source: PathBuf,
    #[serde(default)]
    pub dest: String,
    pub label: String,
}

impl ComponentMapping {
    pub fn new(
        source: impl Into<PathBuf>,
        dest: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            label: label.into(),
        }
    }

    /// Reject mappings that could escape the workspace or deployment root.
    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidMapping {
            label: self.label.clone(),
            reason: reason.into(),
        };

        if self.source.as_os_str().is_empty() {
            return Err(invalid("source path is empty"));
        }
        if self.source.is_absolute() {
            return Err(invalid("source path must be relative to the workspace root"));
        }
        if self
            .source
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(invalid("source path must not contain '..'"));
        }
        if self.dest.starts_with('/') || self.dest.split('/').any(|seg| seg == "..") {
            return Err(invalid("dest must be a relative path without '..'"));
        }
        Ok(())
    }
}

// ── Resolution ────────────────────────────────────────────────────────────────

/// How a component's source path classified on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Source is a plain file; staged directly under the destination.
    SingleFile,
    /// Source is a directory; implies recursive inclusion of all descendants
    /// not excluded by the skip set.
    Tree,
}

/// A mapping whose source exists, ready to be staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUnit {
    pub mapping: ComponentMapping,
    pub kind: UnitKind,
}

/// Outcome of resolving one configured mapping.
///
/// `Missing` is informational, not an error: optional components (alternate
/// build outputs) are expected to be absent in some workspaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Unit(ResolvedUnit),
    Missing { label: String, source: PathBuf },
}

// ── Staged file entry ─────────────────────────────────────────────────────────

/// One file the staging engine copied.
///
/// `relative_path` is the deployment-root-relative location (the publisher
/// re-derives the remote path from it); `staged_path` is where the copy lives
/// inside the staging area. Lifetime is the single run: entries are discarded
/// with the staging area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub relative_path: PathBuf,
    pub staged_path: PathBuf,
    pub rewritten: bool,
}

impl StagedFile {
    pub fn file_name(&self) -> &str {
        self.relative_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    pub fn staged_dir(&self) -> Option<&Path> {
        self.staged_path.parent()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_mapping_passes() {
        let m = ComponentMapping::new("favcreators/docs", "fc", "FavCreators app");
        assert!(m.validate().is_ok());
    }

    #[test]
    fn empty_dest_means_deployment_root() {
        let m = ComponentMapping::new("index.html", "", "Main site index");
        assert!(m.validate().is_ok());
        assert!(m.dest.is_empty());
    }

    #[test]
    fn absolute_source_is_rejected() {
        let m = ComponentMapping::new("/etc/passwd", "", "nope");
        assert!(matches!(
            m.validate(),
            Err(DomainError::InvalidMapping { .. })
        ));
    }

    #[test]
    fn parent_traversal_is_rejected() {
        assert!(ComponentMapping::new("../outside", "", "escape").validate().is_err());
        assert!(ComponentMapping::new("ok", "../up", "escape").validate().is_err());
        assert!(ComponentMapping::new("ok", "/abs", "escape").validate().is_err());
    }

    #[test]
    fn empty_source_is_rejected() {
        assert!(ComponentMapping::new("", "x", "empty").validate().is_err());
    }

    #[test]
    fn mapping_deserializes_from_toml() {
        let m: ComponentMapping = toml::from_str(
            r#"
            source = "favcreators/docs"
            dest = "fc"
            label = "FavCreators app"
            "#,
        )
        .unwrap();
        assert_eq!(m.source, PathBuf::from("favcreators/docs"));
        assert_eq!(m.dest, "fc");
    }

    #[test]
    fn dest_defaults_to_empty_when_omitted() {
        let m: ComponentMapping = toml::from_str(
            r#"
            source = "index.html"
            label = "Main site index"
            "#,
        )
        .unwrap();
        assert!(m.dest.is_empty());
    }
}
