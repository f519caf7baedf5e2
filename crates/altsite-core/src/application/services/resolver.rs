//! Manifest Resolver - stage one of the pipeline.
//!
//! Turns the declarative component list into concrete copy units by probing
//! the workspace: a mapping whose source is absent becomes an informational
//! `Missing`, a present one classifies as a single file or a tree. Read-only;
//! the resolver never writes anything.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{ComponentMapping, Resolution, ResolvedUnit, UnitKind},
};

/// Resolves component mappings against a fixed workspace root.
pub struct ManifestResolver<'a> {
    fs: &'a dyn Filesystem,
    workspace_root: PathBuf,
}

impl<'a> ManifestResolver<'a> {
    pub fn new(fs: &'a dyn Filesystem, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            workspace_root: workspace_root.into(),
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Resolve one mapping. Missing sources are expected (alternate build
    /// outputs), so this never fails.
    pub fn resolve(&self, mapping: &ComponentMapping) -> Resolution {
        let absolute = self.workspace_root.join(&mapping.source);

        if !self.fs.exists(&absolute) {
            debug!(label = %mapping.label, source = %mapping.source.display(), "component not present");
            return Resolution::Missing {
                label: mapping.label.clone(),
                source: mapping.source.clone(),
            };
        }

        let kind = if self.fs.is_dir(&absolute) {
            UnitKind::Tree
        } else {
            UnitKind::SingleFile
        };
        debug!(label = %mapping.label, ?kind, "component resolved");

        Resolution::Unit(ResolvedUnit {
            mapping: mapping.clone(),
            kind,
        })
    }

    /// Resolve every mapping, preserving declaration order.
    #[instrument(skip_all, fields(components = mappings.len()))]
    pub fn resolve_all(&self, mappings: &[ComponentMapping]) -> Vec<Resolution> {
        mappings.iter().map(|m| self.resolve(m)).collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::staging::test_support::TestFs;

    fn mapping(source: &str, dest: &str, label: &str) -> ComponentMapping {
        ComponentMapping::new(source, dest, label)
    }

    #[test]
    fn missing_source_resolves_to_missing() {
        let fs = TestFs::new();
        let resolver = ManifestResolver::new(&fs, "/site");

        let res = resolver.resolve(&mapping("findstocks", "findstocks", "FindStocks app"));
        assert!(matches!(res, Resolution::Missing { ref label, .. } if label == "FindStocks app"));
    }

    #[test]
    fn plain_file_resolves_to_single_file() {
        let fs = TestFs::new();
        fs.add_file("/site/index.html", b"<html></html>");
        let resolver = ManifestResolver::new(&fs, "/site");

        let res = resolver.resolve(&mapping("index.html", "", "Main site index"));
        match res {
            Resolution::Unit(unit) => assert_eq!(unit.kind, UnitKind::SingleFile),
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[test]
    fn directory_resolves_to_tree() {
        let fs = TestFs::new();
        fs.add_file("/site/stats/index.php", b"<?php ?>");
        let resolver = ManifestResolver::new(&fs, "/site");

        let res = resolver.resolve(&mapping("stats", "stats", "Stats dashboard"));
        match res {
            Resolution::Unit(unit) => assert_eq!(unit.kind, UnitKind::Tree),
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[test]
    fn resolve_all_preserves_declaration_order() {
        let fs = TestFs::new();
        fs.add_file("/site/index.html", b"x");
        fs.add_file("/site/vr/index.html", b"x");
        let resolver = ManifestResolver::new(&fs, "/site");

        let mappings = [
            mapping("index.html", "", "Main site index"),
            mapping("ghost", "", "Not there"),
            mapping("vr", "vr", "VR experience"),
        ];
        let resolutions = resolver.resolve_all(&mappings);

        assert_eq!(resolutions.len(), 3);
        assert!(matches!(resolutions[0], Resolution::Unit(_)));
        assert!(matches!(resolutions[1], Resolution::Missing { .. }));
        assert!(matches!(resolutions[2], Resolution::Unit(_)));
    }
}
