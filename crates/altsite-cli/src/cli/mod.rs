//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "altsite",
    bin_name = "altsite",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f310} Mirror a site onto an alternative domain",
    long_about = "Altsite stages a site checkout into a temporary directory, \
                  rewrites every reference to the source domain, and publishes \
                  the result to the alternative domain's FTP space.",
    after_help = "EXAMPLES:\n\
        \x20 altsite deploy --dry-run\n\
        \x20 altsite deploy --target tdotevent.ca\n\
        \x20 altsite plan\n\
        \x20 altsite completions bash > /usr/share/bash-completion/completions/altsite\n\n\
        CREDENTIALS:\n\
        \x20 FTP_SERVER (or FTP_HOST), FTP_USER and FTP_PASS, from the\n\
        \x20 environment or a .env file in the working directory.",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Stage, rewrite and upload the site.
    #[command(
        visible_alias = "d",
        about = "Deploy the site to the alternative domain",
        after_help = "EXAMPLES:\n\
            \x20 altsite deploy --dry-run\n\
            \x20 altsite deploy --target tdotevent.ca --keep-staging\n\
            \x20 altsite deploy --ftp-path staging.tdotevent.ca"
    )]
    Deploy(DeployArgs),

    /// Show which components would deploy, without staging anything.
    #[command(
        visible_alias = "p",
        about = "List resolved components",
        after_help = "EXAMPLES:\n\
            \x20 altsite plan\n\
            \x20 altsite plan -C ~/sites/findtorontoevents"
    )]
    Plan(PlanArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 altsite completions bash > ~/.local/share/bash-completion/completions/altsite\n\
            \x20 altsite completions zsh  > ~/.zfunc/_altsite\n\
            \x20 altsite completions fish > ~/.config/fish/completions/altsite.fish"
    )]
    Completions(CompletionsArgs),
}

// ── deploy ────────────────────────────────────────────────────────────────────

/// Arguments for `altsite deploy`.
#[derive(Debug, Args)]
pub struct DeployArgs {
    /// Target domain to deploy as.
    #[arg(
        short = 't',
        long = "target",
        value_name = "DOMAIN",
        help = "Target domain (default from config)"
    )]
    pub target: Option<String>,

    /// Source domain whose references get rewritten.
    #[arg(
        short = 's',
        long = "source",
        value_name = "DOMAIN",
        help = "Source domain to replace (default from config)"
    )]
    pub source: Option<String>,

    /// Remote base directory, when it differs from the target domain.
    #[arg(
        long = "ftp-path",
        value_name = "PATH",
        help = "Remote base directory (default: the target domain)"
    )]
    pub ftp_path: Option<String>,

    /// Stage and rewrite, but upload nothing.
    #[arg(long = "dry-run", help = "Stage and rewrite without uploading")]
    pub dry_run: bool,

    /// Retain the staging directory after the run.
    #[arg(long = "keep-staging", help = "Keep the staging directory for inspection")]
    pub keep_staging: bool,
}

// ── plan ──────────────────────────────────────────────────────────────────────

/// Arguments for `altsite plan`.
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Include components whose source is absent.
    #[arg(long = "all", help = "Also list missing components")]
    pub all: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `altsite completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_deploy_command() {
        let cli = Cli::parse_from([
            "altsite",
            "deploy",
            "--target",
            "tdotevent.ca",
            "--dry-run",
        ]);
        if let Commands::Deploy(args) = cli.command {
            assert_eq!(args.target.as_deref(), Some("tdotevent.ca"));
            assert!(args.dry_run);
            assert!(!args.keep_staging);
        } else {
            panic!("expected Deploy command");
        }
    }

    #[test]
    fn deploy_alias() {
        let cli = Cli::parse_from(["altsite", "d", "--dry-run"]);
        assert!(matches!(cli.command, Commands::Deploy(_)));
    }

    #[test]
    fn workspace_flag_is_global() {
        let cli = Cli::parse_from(["altsite", "plan", "-C", "/tmp/site"]);
        assert_eq!(
            cli.global.workspace.as_deref(),
            Some(std::path::Path::new("/tmp/site"))
        );
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["altsite", "--quiet", "--verbose", "plan"]);
        assert!(result.is_err());
    }
}
