//! Pipeline services: resolver → staging engine → publisher, orchestrated by
//! [`DeployService`].

pub mod deploy;
pub mod publisher;
pub mod resolver;
pub mod staging;

pub use deploy::{Credentials, DeployPlan, DeployService, DeploySummary, RunPhase};
pub use publisher::{PublishReport, Publisher, UploadFailure};
pub use resolver::ManifestResolver;
pub use staging::{ComponentRecord, ComponentStatus, FileNote, StagingEngine, StagingReport};
