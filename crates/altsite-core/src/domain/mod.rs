//! Core domain layer for altsite.
//!
//! This module contains pure business logic with ZERO external dependencies.
//! Filesystem and network concerns are handled via ports (traits) defined in
//! the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror + serde derives
//! - **Immutable entities**: All domain objects are Clone + PartialEq

pub mod error;
pub mod identity;
pub mod manifest;
pub mod rewritable;
pub mod skip_set;

// Re-exports for convenience
pub use error::{DomainError, ErrorCategory};
pub use identity::{Identity, RewriteRules};
pub use manifest::{ComponentMapping, Resolution, ResolvedUnit, StagedFile, UnitKind};
pub use rewritable::RewritableSet;
pub use skip_set::SkipSet;
