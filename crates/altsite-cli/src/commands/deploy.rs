//! Implementation of the `altsite deploy` command.
//!
//! Responsibility: translate CLI arguments into a `DeployPlan`, run the core
//! pipeline with real adapters, and display results. No business logic lives
//! here.

use tracing::{info, instrument};

use altsite_adapters::{FtpRemote, LocalFilesystem, StagingArea};
use altsite_core::prelude::*;

use crate::{
    cli::{DeployArgs, GlobalArgs},
    config::{AppConfig, credentials_from_env},
    error::{CliError, CliResult},
    output::OutputManager,
};

use super::{build_plan, workspace_root};

/// Execute the `altsite deploy` command.
///
/// Dispatch sequence:
/// 1. Build the plan from config + CLI overrides
/// 2. Dry run: stage and report, no credentials needed
/// 3. Publish: read credentials, preflight login, stage, upload
/// 4. Summarise; per-file failures are reported but do not fail the run
#[instrument(skip_all, fields(dry_run = args.dry_run))]
pub fn execute(
    args: DeployArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let workspace = workspace_root(&global)?;
    let plan = build_plan(&config, args.source.as_deref(), args.target.as_deref())?;
    let remote_base = args
        .ftp_path
        .clone()
        .unwrap_or_else(|| plan.target.to_string());

    output.header(&format!(
        "Deploying as {} (rewriting {})",
        plan.target, plan.source
    ))?;
    output.print(&format!("  Workspace: {}", workspace.display()))?;
    output.print(&format!("  Remote:    /{remote_base}/"))?;
    if args.dry_run {
        output.info("Dry run: nothing will be uploaded")?;
    }
    output.print("")?;

    let fs = LocalFilesystem::new();
    let service = DeployService::new(&fs, workspace);
    let staging = StagingArea::create().map_err(CliError::Core)?;

    let result = if args.dry_run {
        service.stage_only(&plan, staging.path())
    } else {
        let credentials = credentials_from_env()?;
        let mut remote = FtpRemote::new();
        info!(host = %credentials.host, "publishing over FTP");
        service.deploy(&plan, staging.path(), &remote_base, &credentials, &mut remote)
    };

    // A failed run still honors --keep-staging: whatever was staged before
    // the failure stays on disk for inspection.
    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            if args.keep_staging {
                let kept = staging.keep();
                output.error(&format!("Staging kept at {}", kept.display()))?;
            }
            return Err(CliError::Core(e));
        }
    };

    report_staging(&summary.staging, &output)?;
    if let Some(publish) = &summary.publish {
        report_publish(publish, &remote_base, &output)?;
    }

    match summary.phase {
        RunPhase::DryRunComplete => {
            output.print(&format!("  Staged under {}", staging.path().display()))?;
            output.success("Dry run complete, nothing uploaded")?;
        }
        _ => {
            output.success("Deploy complete!")?;
            if !output.is_quiet() {
                output.print("")?;
                output.print("Verify:")?;
                output.print(&format!("  https://{}/", plan.target))?;
                output.print(&format!("  https://{}/fc/", plan.target))?;
            }
        }
    }

    if args.keep_staging {
        let kept = staging.keep();
        output.info(&format!("Staging kept at {}", kept.display()))?;
    }

    Ok(())
}

// ── Reporting ─────────────────────────────────────────────────────────────────

fn report_staging(staging: &StagingReport, output: &OutputManager) -> CliResult<()> {
    for record in &staging.components {
        match &record.status {
            ComponentStatus::Missing => {
                output.print(&format!("  skip  {} (not found)", record.label))?;
            }
            ComponentStatus::Staged { files } => {
                output.print(&format!("  stage {} ({files} files)", record.label))?;
            }
        }
    }

    output.print("")?;
    output.print(&format!(
        "Staged {} files ({} rewritten, {} skipped)",
        staging.staged_count(),
        staging.rewritten_count(),
        staging.skipped.len()
    ))?;

    if !staging.failed.is_empty() {
        output.warning(&format!("{} files could not be staged:", staging.failed.len()))?;
        for note in &staging.failed {
            output.print(&format!("  {} ({})", note.path.display(), note.reason))?;
        }
    }
    Ok(())
}

fn report_publish(
    publish: &PublishReport,
    remote_base: &str,
    output: &OutputManager,
) -> CliResult<()> {
    output.print(&format!(
        "Uploaded {}/{} files to /{}/",
        publish.uploaded, publish.attempted, remote_base
    ))?;

    if !publish.failures.is_empty() {
        output.warning(&format!("{} uploads failed:", publish.failures.len()))?;
        for failure in &publish.failures {
            output.print(&format!("  {} ({})", failure.remote_path, failure.reason))?;
        }
    }
    Ok(())
}
