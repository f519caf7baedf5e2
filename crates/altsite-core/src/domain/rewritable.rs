//! Which files get their content rewritten as text.

use std::collections::HashSet;
use std::path::Path;

/// File extensions (and exact dotfile basenames) treated as rewritable text.
///
/// Everything else is copied byte-for-byte: images, fonts, compiled binary
/// chunks. Matching is case-insensitive on the extension; exact names cover
/// extensionless dotfiles like `.htaccess`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewritableSet {
    extensions: HashSet<String>,
    exact_names: HashSet<String>,
}

impl RewritableSet {
    pub fn new(
        extensions: impl IntoIterator<Item = String>,
        exact_names: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            exact_names: exact_names.into_iter().map(|n| n.to_ascii_lowercase()).collect(),
        }
    }

    /// Default text-based extensions that may carry domain references.
    pub fn site_defaults() -> Self {
        let extensions = [
            "html", "htm", "php", "js", "jsx", "ts", "tsx", "css", "json", "xml", "svg", "md",
            "txt", "yml", "yaml", "htaccess", "env", "example", "map",
        ];
        let exact_names = [".htaccess", ".env"];
        Self::new(
            extensions.into_iter().map(String::from),
            exact_names.into_iter().map(String::from),
        )
    }

    /// Should this file's content go through the rewrite rules?
    pub fn is_rewritable(&self, path: &Path) -> bool {
        if let Some(name) = path.file_name().and_then(|n| n.to_str())
            && self.exact_names.contains(&name.to_ascii_lowercase())
        {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_ascii_lowercase()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn text_extensions_are_rewritable() {
        let set = RewritableSet::site_defaults();
        for name in ["index.html", "app.js", "style.css", "events.json", "logo.svg"] {
            assert!(set.is_rewritable(&PathBuf::from(name)), "failed for {name}");
        }
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let set = RewritableSet::site_defaults();
        assert!(set.is_rewritable(&PathBuf::from("INDEX.HTML")));
        assert!(set.is_rewritable(&PathBuf::from("Map.JSON")));
    }

    #[test]
    fn binary_extensions_are_not_rewritable() {
        let set = RewritableSet::site_defaults();
        for name in ["photo.png", "font.woff2", "archive.zip", "chunk.wasm"] {
            assert!(!set.is_rewritable(&PathBuf::from(name)), "failed for {name}");
        }
    }

    #[test]
    fn htaccess_dotfile_is_rewritable() {
        // `.htaccess` has no extension in path terms; the exact-name list
        // covers it.
        let set = RewritableSet::site_defaults();
        assert!(set.is_rewritable(&PathBuf::from(".htaccess")));
        assert!(set.is_rewritable(&PathBuf::from("api/.htaccess")));
    }

    #[test]
    fn extensionless_regular_file_is_not_rewritable() {
        let set = RewritableSet::site_defaults();
        assert!(!set.is_rewritable(&PathBuf::from("LICENSE")));
        assert!(!set.is_rewritable(&PathBuf::from("Makefile")));
    }
}
