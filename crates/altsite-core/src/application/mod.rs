//! Application layer: pipeline services and the ports they depend on.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use services::{
    ComponentRecord, ComponentStatus, Credentials, DeployPlan, DeployService, DeploySummary,
    FileNote, ManifestResolver, PublishReport, Publisher, RunPhase, StagingEngine, StagingReport,
    UploadFailure,
};
