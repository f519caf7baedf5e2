//! Deploy orchestration: resolver → staging engine → publisher as one run.
//!
//! A run is a single pass through the pipeline. In publish mode the remote
//! login happens *before* staging, so a bad credential fails in seconds
//! instead of after a long staging phase. Dry runs never touch the network
//! at all.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::{
    application::{
        error::ApplicationError,
        ports::{Filesystem, RemoteStore},
        services::{
            publisher::{PublishReport, Publisher},
            resolver::ManifestResolver,
            staging::{StagingEngine, StagingReport},
        },
    },
    domain::{ComponentMapping, DomainError, Identity, RewritableSet, RewriteRules, SkipSet},
    error::AltsiteResult,
};

// ── Plan and mode ─────────────────────────────────────────────────────────────

/// Everything a run needs to know, resolved before any work starts.
#[derive(Debug, Clone)]
pub struct DeployPlan {
    pub components: Vec<ComponentMapping>,
    pub skip: SkipSet,
    pub rewritable: RewritableSet,
    pub source: Identity,
    pub target: Identity,
}

impl DeployPlan {
    /// Validate the plan and derive the rewrite rules for it.
    pub fn rules(&self) -> Result<RewriteRules, DomainError> {
        for mapping in &self.components {
            mapping.validate()?;
        }
        RewriteRules::derive(&self.source, &self.target)
    }
}

/// Remote login material. The secret is deliberately excluded from Debug.
#[derive(Clone)]
pub struct Credentials {
    pub host: String,
    pub user: String,
    pub secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("secret", &"***")
            .finish()
    }
}

/// Where the run ended up.
///
/// Staging and publishing phases are strictly ordered; a summary's phase
/// tells which of them completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Staging,
    DryRunComplete,
    Publishing,
    Done,
    Failed,
}

/// Combined outcome of one run.
#[derive(Debug, Clone)]
pub struct DeploySummary {
    pub phase: RunPhase,
    pub staging: StagingReport,
    pub publish: Option<PublishReport>,
}

// ── Service ───────────────────────────────────────────────────────────────────

/// Runs the full pipeline against one workspace.
pub struct DeployService<'a> {
    fs: &'a dyn Filesystem,
    workspace_root: PathBuf,
}

impl<'a> DeployService<'a> {
    pub fn new(fs: &'a dyn Filesystem, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            workspace_root: workspace_root.into(),
        }
    }

    /// Resolve and stage without any remote interaction.
    #[instrument(skip_all)]
    pub fn stage_only(
        &self,
        plan: &DeployPlan,
        staging_root: &Path,
    ) -> AltsiteResult<DeploySummary> {
        let staging = self.run_staging(plan, staging_root)?;
        info!(
            staged = staging.staged_count(),
            rewritten = staging.rewritten_count(),
            "dry run complete, nothing uploaded"
        );
        Ok(DeploySummary {
            phase: RunPhase::DryRunComplete,
            staging,
            publish: None,
        })
    }

    /// Full run: preflight login, stage, publish.
    #[instrument(skip_all, fields(host = %credentials.host))]
    pub fn deploy(
        &self,
        plan: &DeployPlan,
        staging_root: &Path,
        remote_base: &str,
        credentials: &Credentials,
        client: &mut dyn RemoteStore,
    ) -> AltsiteResult<DeploySummary> {
        // Login first so credential problems surface before staging work.
        client.login(&credentials.host, &credentials.user, &credentials.secret)?;
        info!(host = %credentials.host, user = %credentials.user, "logged in");

        let staging = self.run_staging(plan, staging_root)?;

        let publish = Publisher::new(self.fs).publish(staging_root, remote_base, client)?;

        if let Err(e) = client.close() {
            warn!(error = %e, "remote session did not close cleanly");
        }

        Ok(DeploySummary {
            phase: RunPhase::Done,
            staging,
            publish: Some(publish),
        })
    }

    fn run_staging(&self, plan: &DeployPlan, staging_root: &Path) -> AltsiteResult<StagingReport> {
        if !self.fs.is_dir(&self.workspace_root) {
            return Err(ApplicationError::WorkspaceMissing {
                path: self.workspace_root.clone(),
            }
            .into());
        }
        let rules = plan.rules()?;

        let resolver = ManifestResolver::new(self.fs, self.workspace_root.clone());
        let resolutions = resolver.resolve_all(&plan.components);

        let engine = StagingEngine::new(
            self.fs,
            self.workspace_root.clone(),
            plan.skip.clone(),
            plan.rewritable.clone(),
            rules,
        );
        engine.stage(&resolutions, staging_root)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::staging::test_support::TestFs;
    use crate::error::AltsiteError;

    fn plan() -> DeployPlan {
        DeployPlan {
            components: vec![
                ComponentMapping::new("index.html", "", "Main site index"),
                ComponentMapping::new("stats", "stats", "Stats dashboard"),
            ],
            skip: SkipSet::site_defaults(),
            rewritable: RewritableSet::site_defaults(),
            source: Identity::new("findtorontoevents.ca").unwrap(),
            target: Identity::new("tdotevent.ca").unwrap(),
        }
    }

    fn creds() -> Credentials {
        Credentials {
            host: "ftp.example.net".into(),
            user: "deploy".into(),
            secret: "hunter2".into(),
        }
    }

    /// Remote double that refuses login and counts every call.
    #[derive(Default)]
    struct RefusingRemote {
        calls: usize,
    }

    impl RemoteStore for RefusingRemote {
        fn login(&mut self, host: &str, _user: &str, _secret: &str) -> AltsiteResult<()> {
            self.calls += 1;
            Err(ApplicationError::ConnectionFailed {
                host: host.into(),
                reason: "530 login incorrect".into(),
            }
            .into())
        }

        fn change_directory(&mut self, _path: &str) -> AltsiteResult<()> {
            self.calls += 1;
            Ok(())
        }

        fn create_directory(&mut self, _name: &str) -> AltsiteResult<()> {
            self.calls += 1;
            Ok(())
        }

        fn store_file(&mut self, _filename: &str, _bytes: &[u8]) -> AltsiteResult<()> {
            self.calls += 1;
            Ok(())
        }

        fn delete_file(&mut self, _path: &str) -> AltsiteResult<()> {
            self.calls += 1;
            Ok(())
        }

        fn close(&mut self) -> AltsiteResult<()> {
            Ok(())
        }
    }

    #[test]
    fn stage_only_summary_has_no_publish_report() {
        let fs = TestFs::new();
        fs.add_file("/site/index.html", b"findtorontoevents.ca");
        let service = DeployService::new(&fs, "/site");

        let summary = service.stage_only(&plan(), Path::new("/stage")).unwrap();

        assert_eq!(summary.phase, RunPhase::DryRunComplete);
        assert!(summary.publish.is_none());
        assert_eq!(summary.staging.staged_count(), 1);
        assert!(fs.file("/stage/index.html").is_some());
    }

    #[test]
    fn missing_workspace_is_fatal_before_any_staging() {
        let fs = TestFs::new();
        let service = DeployService::new(&fs, "/nowhere");

        let err = service.stage_only(&plan(), Path::new("/stage")).unwrap_err();
        assert!(matches!(
            err,
            AltsiteError::Application(ApplicationError::WorkspaceMissing { .. })
        ));
    }

    #[test]
    fn equal_identities_are_rejected_before_staging() {
        let fs = TestFs::new();
        fs.add_dir("/site");
        let mut bad = plan();
        bad.target = bad.source.clone();
        let service = DeployService::new(&fs, "/site");

        let err = service.stage_only(&bad, Path::new("/stage")).unwrap_err();
        assert!(matches!(err, AltsiteError::Domain(_)));
    }

    #[test]
    fn failed_login_aborts_before_staging_starts() {
        let fs = TestFs::new();
        fs.add_file("/site/index.html", b"x");
        let service = DeployService::new(&fs, "/site");
        let mut remote = RefusingRemote::default();

        let err = service
            .deploy(
                &plan(),
                Path::new("/stage"),
                "tdotevent.ca",
                &creds(),
                &mut remote,
            )
            .unwrap_err();

        assert!(err.is_connection_failure());
        // Only the login call happened; nothing was staged.
        assert_eq!(remote.calls, 1);
        assert!(fs.file("/stage/index.html").is_none());
    }

    #[test]
    fn credentials_debug_hides_the_secret() {
        let rendered = format!("{:?}", creds());
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("deploy"));
    }
}
