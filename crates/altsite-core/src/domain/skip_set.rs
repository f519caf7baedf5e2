//! The skip set: names and reserved basenames excluded from staging and
//! publication regardless of which component they appear under.

use std::collections::HashSet;
use std::path::Path;

/// Path segments and reserved device stems that must never be staged.
///
/// Two kinds of exclusion:
/// - `names`: exact path-segment match (directories pruned before descent,
///   files dropped at staging time).
/// - `reserved`: basenames that cannot be created on some deployment
///   platforms, checked case-insensitively against the file *stem*
///   (`nul.txt` is excluded because its stem is `nul`).
///
/// Both sides are plain data so callers can target a different platform by
/// passing a different (possibly empty) reserved set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipSet {
    names: HashSet<String>,
    reserved: HashSet<String>,
}

impl SkipSet {
    pub fn new(
        names: impl IntoIterator<Item = String>,
        reserved: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            names: names.into_iter().collect(),
            reserved: reserved.into_iter().map(|s| s.to_ascii_lowercase()).collect(),
        }
    }

    /// Default exclusions for a web-property workspace: version control,
    /// dependency caches, sibling project checkouts, test artifacts,
    /// secrets.
    pub fn site_defaults() -> Self {
        let names = [
            ".git",
            ".github",
            ".cursor",
            "node_modules",
            "__pycache__",
            "TORONTOEVENTS_ANTIGRAVITY",
            "MOVIESHOWS",
            "MOVIESHOWS2",
            "MOVIESHOWS3",
            "DEPLOY",
            "favcreators_source",
            "tests",
            "playwright.config.ts",
            "playwright-report",
            "test-results",
            ".env",
            "package-lock.json",
        ];
        Self::new(
            names.into_iter().map(String::from),
            Self::windows_reserved(),
        )
    }

    /// Basenames that cannot exist as files on Windows.
    pub fn windows_reserved() -> Vec<String> {
        let mut reserved: Vec<String> = ["con", "prn", "aux", "nul"]
            .into_iter()
            .map(String::from)
            .collect();
        for i in 1..10 {
            reserved.push(format!("com{i}"));
            reserved.push(format!("lpt{i}"));
        }
        reserved
    }

    /// Add an exact-name exclusion.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Should a file or directory with this basename be skipped?
    pub fn skips(&self, name: &str) -> bool {
        if self.names.contains(name) {
            return true;
        }
        // Reserved device names match on the stem, so `nul`, `NUL.txt` and
        // `Con.html` are all excluded.
        Path::new(name)
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| self.reserved.contains(&stem.to_ascii_lowercase()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_names_are_skipped() {
        let skip = SkipSet::site_defaults();
        assert!(skip.skips(".git"));
        assert!(skip.skips("node_modules"));
        assert!(skip.skips("package-lock.json"));
    }

    #[test]
    fn sibling_project_checkouts_are_skipped() {
        let skip = SkipSet::site_defaults();
        for name in [
            "TORONTOEVENTS_ANTIGRAVITY",
            "MOVIESHOWS",
            "MOVIESHOWS2",
            "MOVIESHOWS3",
            "DEPLOY",
            "favcreators_source",
        ] {
            assert!(skip.skips(name), "{name} should be skipped");
        }
    }

    #[test]
    fn exact_match_is_case_sensitive() {
        let skip = SkipSet::site_defaults();
        assert!(!skip.skips("Node_Modules"));
    }

    #[test]
    fn ordinary_names_pass() {
        let skip = SkipSet::site_defaults();
        assert!(!skip.skips("index.html"));
        assert!(!skip.skips("events.json"));
        assert!(!skip.skips("assets"));
    }

    #[test]
    fn reserved_stems_are_case_insensitive() {
        let skip = SkipSet::site_defaults();
        assert!(skip.skips("nul"));
        assert!(skip.skips("NUL.txt"));
        assert!(skip.skips("Con.html"));
        assert!(skip.skips("com3"));
        assert!(skip.skips("lpt9.log"));
    }

    #[test]
    fn reserved_check_is_on_the_stem_not_a_substring() {
        let skip = SkipSet::site_defaults();
        assert!(!skip.skips("console.js"));
        assert!(!skip.skips("nullable.ts"));
        assert!(!skip.skips("aux-panel.css"));
    }

    #[test]
    fn empty_reserved_set_disables_device_filtering() {
        let skip = SkipSet::new(vec![".git".to_string()], Vec::new());
        assert!(!skip.skips("nul"));
        assert!(skip.skips(".git"));
    }

    #[test]
    fn insert_extends_the_name_set() {
        let mut skip = SkipSet::site_defaults();
        assert!(!skip.skips("secret-drafts"));
        skip.insert("secret-drafts");
        assert!(skip.skips("secret-drafts"));
    }
}
