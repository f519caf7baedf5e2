use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// The identity string is not a usable bare hostname.
    #[error("invalid identity '{value}': {reason}")]
    InvalidIdentity { value: String, reason: String },

    /// A component mapping is malformed (empty source, absolute paths, ...).
    #[error("invalid component mapping '{label}': {reason}")]
    InvalidMapping { label: String, reason: String },

    /// Source and target identity are the same; rewriting would be a no-op
    /// and publishing would overwrite the live site path.
    #[error("source and target identity are both '{identity}'")]
    IdentitiesEqual { identity: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidIdentity { value, reason } => vec![
                format!("'{}' is not a valid identity: {}", value, reason),
                "Pass a bare hostname, e.g. tdotevent.ca".into(),
                "Do not include a scheme (https://) or a path".into(),
            ],
            Self::InvalidMapping { label, reason } => vec![
                format!("Component '{}' is misconfigured: {}", label, reason),
                "Check the [[component]] entries in your altsite.toml".into(),
            ],
            Self::IdentitiesEqual { identity } => vec![
                format!("Both identities resolved to '{}'", identity),
                "Pass a different --target (or --source) domain".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        // Every domain error here is a validation failure of user-supplied
        // configuration.
        ErrorCategory::Validation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
