//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Config file (`--config`, `.altsite.toml` in the workspace, or the
//!    user-level config directory)
//! 3. Built-in defaults (always present)
//!
//! Credentials are deliberately kept out of the config file; they come from
//! the environment (optionally via `.env`) only.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use altsite_core::prelude::Credentials;
use altsite_core::application::ApplicationError;

use crate::error::{CliError, CliResult};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Source and target domain defaults.
    pub identities: IdentityConfig,
    /// Component manifest. Empty means "use the built-in site manifest".
    pub components: Vec<ComponentEntry>,
    /// Extra path-segment names to exclude, on top of the built-in skip set.
    pub skip: Vec<String>,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub source: String,
    pub target: String,
}

/// One manifest row as it appears in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentEntry {
    pub source: String,
    #[serde(default)]
    pub dest: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            source: "findtorontoevents.ca".into(),
            target: "tdotevent.ca".into(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            identities: IdentityConfig::default(),
            components: Vec::new(),
            skip: Vec::new(),
            output: OutputConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit `--config` path must exist and parse; the default
    /// locations are optional and fall through to built-in defaults.
    pub fn load(config_file: Option<&PathBuf>, workspace: &Path) -> CliResult<Self> {
        if let Some(path) = config_file {
            return Self::from_file(path);
        }
        for candidate in [workspace.join(".altsite.toml"), Self::config_path()] {
            if candidate.is_file() {
                return Self::from_file(&candidate);
            }
        }
        Ok(Self::default())
    }

    fn from_file(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CliError::ConfigError {
            message: format!("cannot read {}: {e}", path.display()),
            source: Some(Box::new(e)),
        })?;
        toml::from_str(&text).map_err(|e| CliError::ConfigError {
            message: format!("cannot parse {}: {e}", path.display()),
            source: Some(Box::new(e)),
        })
    }

    /// Path to the user-level configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.altsite.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("ca", "altsite", "altsite")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".altsite.toml"))
    }

    /// The effective manifest: configured components, or the built-in one.
    pub fn manifest(&self) -> Vec<(String, String, String)> {
        if self.components.is_empty() {
            default_manifest()
        } else {
            self.components
                .iter()
                .map(|c| (c.source.clone(), c.dest.clone(), c.label.clone()))
                .collect()
        }
    }
}

/// The built-in component manifest for the site this tool grew up with.
///
/// Triples of (workspace-relative source, deploy-root-relative dest, label).
/// Absent sources are fine; the resolver reports them as skipped.
fn default_manifest() -> Vec<(String, String, String)> {
    [
        // Main site
        ("index.html", "", "Main site index"),
        (".htaccess", "", "Apache rewrite rules"),
        ("events.json", "", "Events data (root)"),
        ("events.json", "next", "Events data (next/)"),
        ("last_update.json", "", "Last update timestamp"),
        // Next.js chunks
        ("next/_next", "next/_next", "Next.js static chunks"),
        ("_next", "_next", "Alt Next.js static chunks"),
        // FavCreators (docs = built frontend)
        ("favcreators/docs", "fc", "FavCreators app"),
        // FavCreators API (PHP backend)
        ("favcreators/public/api", "fc/api", "FavCreators API"),
        // Events API
        ("api/events", "fc/events-api", "Events API"),
        // Main API auth
        ("api/google_auth.php", "api", "Google OAuth (auth)"),
        ("api/google_callback.php", "api", "Google OAuth (callback)"),
        ("api/auth_db_config.php", "api", "Auth DB config"),
        ("api/.htaccess", "api", "API htaccess"),
        // Stats
        ("stats", "stats", "Stats dashboard"),
        // VR pages
        ("vr", "vr", "VR experience"),
        // FindStocks
        ("findstocks", "findstocks", "FindStocks app"),
    ]
    .into_iter()
    .map(|(s, d, l)| (s.to_string(), d.to_string(), l.to_string()))
    .collect()
}

// ── Credentials ───────────────────────────────────────────────────────────────

/// Read FTP credentials from the environment.
///
/// `FTP_SERVER` is the canonical host variable; `FTP_HOST` is accepted as an
/// alias.  A `.env` file has already been folded into the environment by the
/// time this runs.
pub fn credentials_from_env() -> CliResult<Credentials> {
    let host = non_empty_env("FTP_SERVER")
        .or_else(|| non_empty_env("FTP_HOST"))
        .ok_or(CliError::Core(
            ApplicationError::MissingCredential {
                field: "FTP_SERVER",
            }
            .into(),
        ))?;
    let user = non_empty_env("FTP_USER").ok_or(CliError::Core(
        ApplicationError::MissingCredential { field: "FTP_USER" }.into(),
    ))?;
    let secret = non_empty_env("FTP_PASS").ok_or(CliError::Core(
        ApplicationError::MissingCredential { field: "FTP_PASS" }.into(),
    ))?;

    Ok(Credentials { host, user, secret })
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_identities_are_the_site_pair() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.identities.source, "findtorontoevents.ca");
        assert_eq!(cfg.identities.target, "tdotevent.ca");
    }

    #[test]
    fn empty_components_fall_back_to_builtin_manifest() {
        let cfg = AppConfig::default();
        let manifest = cfg.manifest();
        assert!(manifest.len() > 10);
        assert!(manifest.iter().any(|(s, _, _)| s == "index.html"));
        assert!(
            manifest
                .iter()
                .any(|(s, d, _)| s == "favcreators/docs" && d == "fc")
        );
    }

    #[test]
    fn config_parses_from_toml() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [identities]
            source = "example.com"
            target = "example.org"

            [[components]]
            source = "site"
            label = "Everything"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.identities.target, "example.org");
        assert_eq!(cfg.manifest(), vec![(
            "site".to_string(),
            String::new(),
            "Everything".to_string()
        )]);
    }

    #[test]
    fn load_without_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load(None, dir.path()).unwrap();
        assert_eq!(cfg.identities.source, "findtorontoevents.ca");
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let result = AppConfig::load(Some(&PathBuf::from("/no/such/file.toml")), Path::new("."));
        assert!(matches!(result, Err(CliError::ConfigError { .. })));
    }

    #[test]
    fn workspace_config_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".altsite.toml"),
            "[identities]\nsource = \"a.ca\"\ntarget = \"b.ca\"\n",
        )
        .unwrap();
        let cfg = AppConfig::load(None, dir.path()).unwrap();
        assert_eq!(cfg.identities.source, "a.ca");
    }

    #[test]
    fn config_path_is_non_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
