//! Implementation of the `altsite plan` command.
//!
//! Resolve-only view: shows what a deploy would pick up, without staging or
//! touching the network.

use tracing::instrument;

use altsite_adapters::LocalFilesystem;
use altsite_core::prelude::*;

use crate::{
    cli::{GlobalArgs, PlanArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

use super::{build_components, workspace_root};

/// Execute the `altsite plan` command.
#[instrument(skip_all)]
pub fn execute(
    args: PlanArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let workspace = workspace_root(&global)?;
    let components = build_components(&config)?;

    let fs = LocalFilesystem::new();
    let resolver = ManifestResolver::new(&fs, workspace.clone());
    let resolutions = resolver.resolve_all(&components);

    output.header(&format!("Components in {}", workspace.display()))?;

    let mut present = 0usize;
    for resolution in &resolutions {
        match resolution {
            Resolution::Unit(unit) => {
                present += 1;
                let detail = match unit.kind {
                    UnitKind::Tree => "tree".to_string(),
                    UnitKind::SingleFile => {
                        let absolute = workspace.join(&unit.mapping.source);
                        match fs.file_size(&absolute) {
                            Ok(size) => format!("{size} bytes"),
                            Err(_) => "file".to_string(),
                        }
                    }
                };
                let dest = if unit.mapping.dest.is_empty() {
                    "/".to_string()
                } else {
                    format!("/{}/", unit.mapping.dest)
                };
                output.print(&format!(
                    "  {:<28} {} -> {} ({})",
                    unit.mapping.label,
                    unit.mapping.source.display(),
                    dest,
                    detail
                ))?;
            }
            Resolution::Missing { label, source } => {
                if args.all {
                    output.print(&format!(
                        "  {:<28} {} (missing)",
                        label,
                        source.display()
                    ))?;
                }
            }
        }
    }

    output.print("")?;
    output.info(&format!(
        "{present} of {} components present",
        resolutions.len()
    ))?;
    Ok(())
}
