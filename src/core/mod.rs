pub mod aggregator;
pub mod engine;
pub mod pipeline;
pub mod resolver;
pub mod scheduler;

pub use crate::domain::model::{
    Artifact, DomainGroup, GroupReport, HostsArtifacts, ResolutionResult, RunSummary,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Resolver, Storage, TimestampProvider};
pub use crate::utils::error::Result;
