//! Command handler implementations.

pub mod completions;
pub mod deploy;
pub mod plan;

use std::path::PathBuf;

use altsite_core::prelude::*;

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

/// The workspace root: `-C` wins, otherwise the current directory.
pub fn workspace_root(global: &GlobalArgs) -> CliResult<PathBuf> {
    match &global.workspace {
        Some(path) => Ok(path.clone()),
        None => std::env::current_dir().map_err(CliError::from),
    }
}

/// Turn config manifest rows into validated component mappings.
pub fn build_components(config: &AppConfig) -> CliResult<Vec<ComponentMapping>> {
    let components: Vec<ComponentMapping> = config
        .manifest()
        .into_iter()
        .map(|(source, dest, label)| ComponentMapping::new(source, dest, label))
        .collect();
    for mapping in &components {
        mapping.validate().map_err(AltsiteError::from)?;
    }
    Ok(components)
}

/// Build a deploy plan from config plus CLI overrides.
pub fn build_plan(
    config: &AppConfig,
    source_override: Option<&str>,
    target_override: Option<&str>,
) -> CliResult<DeployPlan> {
    let source = source_override.unwrap_or(&config.identities.source);
    let target = target_override.unwrap_or(&config.identities.target);

    let mut skip = SkipSet::site_defaults();
    for name in &config.skip {
        skip.insert(name.clone());
    }

    Ok(DeployPlan {
        components: build_components(config)?,
        skip,
        rewritable: RewritableSet::site_defaults(),
        source: Identity::new(source).map_err(AltsiteError::from)?,
        target: Identity::new(target).map_err(AltsiteError::from)?,
    })
}
