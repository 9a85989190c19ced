use crate::core::{HostsArtifacts, Pipeline, RunSummary};
use crate::utils::error::Result;
use std::time::Instant;

pub struct HostsEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> HostsEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        tracing::info!("🚀 Starting hosts update");

        let groups = self.pipeline.extract().await?;
        if groups.is_empty() {
            tracing::warn!("⚠️ No domain groups configured, writing empty hosts files");
        }

        let result = self.pipeline.transform(groups).await?;
        tracing::info!(
            "Resolved {}/{} domains across {} groups in {:?}",
            result.resolved,
            result.domains,
            result.groups,
            started.elapsed()
        );

        let artifacts = self.pipeline.load(result.artifacts).await?;

        Ok(RunSummary {
            groups: result.groups,
            domains: result.domains,
            resolved: result.resolved,
            unresolved: result.domains - result.resolved,
            artifacts,
        })
    }

    /// Resolves and renders without writing anything.
    pub async fn preview(&self) -> Result<HostsArtifacts> {
        let groups = self.pipeline.extract().await?;
        let result = self.pipeline.transform(groups).await?;
        Ok(result.artifacts)
    }
}
