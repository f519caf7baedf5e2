//! Staging Engine - stage two of the pipeline.
//!
//! Mirrors every resolved unit into the staging directory. Text-like files
//! go through the rewrite rules; everything else is copied byte-for-byte.
//! Excluded directories are pruned *before* descent, so the walk never
//! enters a version-control directory or dependency cache at all.
//!
//! Per-file problems never abort the run: an unreadable source or a failed
//! write becomes a `FileNote` in the report and staging moves on. Once
//! `stage` returns, the staging root is a faithful mirror of the union of
//! all resolved units, minus skips, with domain references replaced -
//! independent of whether any upload later succeeds.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::Filesystem,
    domain::{Resolution, ResolvedUnit, RewritableSet, RewriteRules, SkipSet, StagedFile, UnitKind},
    error::AltsiteResult,
};

// ── Report types ──────────────────────────────────────────────────────────────

/// A file that was skipped or failed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNote {
    pub path: PathBuf,
    pub reason: String,
}

/// Per-component outcome, for the structured progress log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRecord {
    pub label: String,
    pub status: ComponentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentStatus {
    /// Source path absent in this workspace.
    Missing,
    /// Staged with this many files (1 for a single-file component).
    Staged { files: usize },
}

/// Everything the staging engine did, as inspectable values.
#[derive(Debug, Clone, Default)]
pub struct StagingReport {
    pub components: Vec<ComponentRecord>,
    pub staged: Vec<StagedFile>,
    pub skipped: Vec<FileNote>,
    pub failed: Vec<FileNote>,
}

impl StagingReport {
    pub fn staged_count(&self) -> usize {
        self.staged.len()
    }

    pub fn rewritten_count(&self) -> usize {
        self.staged.iter().filter(|f| f.rewritten).count()
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Copies resolved units into the staging area, rewriting as it goes.
///
/// All policy (what to skip, what counts as text, what to rewrite) is passed
/// in at construction, never read from globals.
pub struct StagingEngine<'a> {
    fs: &'a dyn Filesystem,
    workspace_root: PathBuf,
    skip: SkipSet,
    rewritable: RewritableSet,
    rules: RewriteRules,
}

impl<'a> StagingEngine<'a> {
    pub fn new(
        fs: &'a dyn Filesystem,
        workspace_root: impl Into<PathBuf>,
        skip: SkipSet,
        rewritable: RewritableSet,
        rules: RewriteRules,
    ) -> Self {
        Self {
            fs,
            workspace_root: workspace_root.into(),
            skip,
            rewritable,
            rules,
        }
    }

    /// Stage every resolved unit under `staging_root`.
    #[instrument(skip_all, fields(staging_root = %staging_root.display()))]
    pub fn stage(
        &self,
        resolutions: &[Resolution],
        staging_root: &Path,
    ) -> AltsiteResult<StagingReport> {
        let mut report = StagingReport::default();

        for resolution in resolutions {
            match resolution {
                Resolution::Missing { label, source } => {
                    info!(%label, source = %source.display(), "skip: component not found");
                    report.components.push(ComponentRecord {
                        label: label.clone(),
                        status: ComponentStatus::Missing,
                    });
                }
                Resolution::Unit(unit) => {
                    let before = report.staged.len();
                    match unit.kind {
                        UnitKind::SingleFile => self.stage_single(unit, staging_root, &mut report),
                        UnitKind::Tree => self.stage_tree(unit, staging_root, &mut report),
                    }
                    let files = report.staged.len() - before;
                    info!(label = %unit.mapping.label, files, "component staged");
                    report.components.push(ComponentRecord {
                        label: unit.mapping.label.clone(),
                        status: ComponentStatus::Staged { files },
                    });
                }
            }
        }

        Ok(report)
    }

    // ── Unit staging ──────────────────────────────────────────────────────────

    fn dest_root(&self, staging_root: &Path, dest: &str) -> PathBuf {
        if dest.is_empty() {
            staging_root.to_path_buf()
        } else {
            staging_root.join(dest)
        }
    }

    fn stage_single(&self, unit: &ResolvedUnit, staging_root: &Path, report: &mut StagingReport) {
        let source = self.workspace_root.join(&unit.mapping.source);
        let Some(name) = source.file_name().map(PathBuf::from) else {
            report.failed.push(FileNote {
                path: source,
                reason: "source has no file name".into(),
            });
            return;
        };

        let relative = if unit.mapping.dest.is_empty() {
            name.clone()
        } else {
            Path::new(&unit.mapping.dest).join(&name)
        };
        let staged = self.dest_root(staging_root, &unit.mapping.dest).join(&name);
        self.stage_file(&source, &staged, relative, report);
    }

    fn stage_tree(&self, unit: &ResolvedUnit, staging_root: &Path, report: &mut StagingReport) {
        let source_root = self.workspace_root.join(&unit.mapping.source);
        let dest_prefix = PathBuf::from(&unit.mapping.dest);
        self.walk_tree(&source_root, &dest_prefix, &PathBuf::new(), staging_root, report);
    }

    /// Recursive descent with skip-set pruning at each directory level.
    fn walk_tree(
        &self,
        source_root: &Path,
        dest_prefix: &Path,
        relative_dir: &Path,
        staging_root: &Path,
        report: &mut StagingReport,
    ) {
        let dir = source_root.join(relative_dir);
        let mut entries = match self.fs.list_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "cannot enumerate directory");
                report.failed.push(FileNote {
                    path: dir,
                    reason: e.to_string(),
                });
                return;
            }
        };
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        for entry in entries {
            let child_rel = relative_dir.join(&entry.name);
            if entry.is_dir {
                // Prune, don't just filter: an excluded subtree is never
                // entered, however deep its contents.
                if self.skip.skips(&entry.name) {
                    debug!(dir = %child_rel.display(), "pruned");
                    report.skipped.push(FileNote {
                        path: child_rel,
                        reason: "directory in skip set".into(),
                    });
                    continue;
                }
                self.walk_tree(source_root, dest_prefix, &child_rel, staging_root, report);
            } else {
                if self.skip.skips(&entry.name) {
                    report.skipped.push(FileNote {
                        path: child_rel,
                        reason: "name in skip set".into(),
                    });
                    continue;
                }
                let source = source_root.join(&child_rel);
                let relative = dest_prefix.join(&child_rel);
                let staged = staging_root.join(&relative);
                self.stage_file(&source, &staged, relative, report);
            }
        }
    }

    // ── File staging ──────────────────────────────────────────────────────────

    /// Copy one file into the staging area, rewriting if it is text-like.
    ///
    /// Decode failure on a rewritable file falls back to a byte-for-byte
    /// copy; read/write failures become `failed` notes. Neither aborts the
    /// run.
    fn stage_file(
        &self,
        source: &Path,
        staged: &Path,
        relative: PathBuf,
        report: &mut StagingReport,
    ) {
        if let Some(parent) = staged.parent()
            && let Err(e) = self.fs.create_dir_all(parent)
        {
            warn!(path = %staged.display(), error = %e, "cannot create staging directory");
            report.failed.push(FileNote {
                path: relative,
                reason: e.to_string(),
            });
            return;
        }

        let bytes = match self.fs.read(source) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %source.display(), error = %e, "unreadable source file, skipped");
                report.failed.push(FileNote {
                    path: relative,
                    reason: e.to_string(),
                });
                return;
            }
        };

        let mut rewritten = false;
        let output = if self.rewritable.is_rewritable(source) {
            match std::str::from_utf8(&bytes) {
                Ok(text) => {
                    let replaced = self.rules.apply(text);
                    rewritten = replaced != text;
                    replaced.into_bytes()
                }
                // Not valid UTF-8 after all; treat as binary.
                Err(_) => bytes,
            }
        } else {
            bytes
        };

        match self.fs.write(staged, &output) {
            Ok(()) => {
                debug!(path = %relative.display(), rewritten, "staged");
                report.staged.push(StagedFile {
                    relative_path: relative,
                    staged_path: staged.to_path_buf(),
                    rewritten,
                });
            }
            Err(e) => {
                warn!(path = %staged.display(), error = %e, "cannot write staged file");
                report.failed.push(FileNote {
                    path: relative,
                    reason: e.to_string(),
                });
            }
        }
    }
}

// ── Test support ──────────────────────────────────────────────────────────────


// ── Tests ─────────────────────────────────────────────────────────────────────
