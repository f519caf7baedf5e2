//! Altsite Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the altsite
//! site-replication tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          altsite-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (Resolver, StagingEngine, Publisher,   │
//! │   DeployService)                        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Driven: Filesystem, RemoteStore)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     altsite-adapters (Infrastructure)   │
//! │  (LocalFilesystem, FtpRemote, memory    │
//! │   doubles for tests)                    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Identity, RewriteRules, SkipSet,      │
//! │   ComponentMapping)                     │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## The pipeline
//!
//! Three stages composed linearly, with the staging directory as the
//! hand-off boundary:
//!
//! 1. **Manifest Resolver** - turns declared component mappings into
//!    concrete copy units (single file vs. tree), skipping absent ones.
//! 2. **Staging Engine** - mirrors every resolved unit into a local
//!    staging directory, rewriting domain references in text files and
//!    copying everything else byte-for-byte.
//! 3. **Publisher** - uploads the staged tree to the remote store,
//!    creating remote directories on demand and tolerating per-file
//!    failures.
//!
//! A dry run stops after stage 2 and never touches the remote store.

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ComponentRecord, ComponentStatus, Credentials, DeployPlan, DeployService, DeploySummary,
        FileNote, ManifestResolver, PublishReport, Publisher, RunPhase, StagingEngine,
        StagingReport, UploadFailure,
        ports::{DirEntry, Filesystem, RemoteStore},
    };
    pub use crate::domain::{
        ComponentMapping, Identity, Resolution, ResolvedUnit, RewritableSet, RewriteRules, SkipSet,
        StagedFile, UnitKind,
    };
    pub use crate::error::{AltsiteError, AltsiteResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
