use crate::config::domains::load_domain_groups;
use crate::core::aggregator::HostsRenderer;
use crate::core::scheduler::BatchScheduler;
use crate::core::{ConfigProvider, DomainGroup, HostsArtifacts, Pipeline, Resolver, Storage};
use crate::domain::model::TransformResult;
use crate::domain::ports::TimestampProvider;
use crate::utils::error::{HostsError, Result};
use crate::utils::time::BeijingClock;
use std::sync::Arc;

/// Domain list in, hosts files out.
pub struct HostsPipeline<R: Resolver, S: Storage, C: ConfigProvider> {
    scheduler: BatchScheduler<R>,
    storage: S,
    config: C,
    clock: Box<dyn TimestampProvider>,
}

impl<R: Resolver, S: Storage, C: ConfigProvider> HostsPipeline<R, S, C> {
    pub fn new(resolver: R, storage: S, config: C) -> Self {
        let scheduler = BatchScheduler::new(
            Arc::new(resolver),
            config.concurrency(),
            config.lookup_timeout(),
        );
        Self {
            scheduler,
            storage,
            config,
            clock: Box::new(BeijingClock),
        }
    }

    pub fn with_clock(mut self, clock: impl TimestampProvider + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }
}

#[async_trait::async_trait]
impl<R: Resolver, S: Storage, C: ConfigProvider> Pipeline for HostsPipeline<R, S, C> {
    async fn extract(&self) -> Result<Vec<DomainGroup>> {
        Ok(load_domain_groups(self.config.domain_file()).await)
    }

    async fn transform(&self, groups: Vec<DomainGroup>) -> Result<TransformResult> {
        let reports = self.scheduler.resolve_all(&groups).await;

        for report in &reports {
            for entry in &report.entries {
                tracing::debug!("[{}] {} -> {}", report.name, entry.domain, entry.result);
            }
            tracing::info!(
                "🔎 {}: {}/{} domains resolved",
                report.name,
                report.resolved_count(),
                report.entries.len()
            );
        }

        // 一次執行只取一次時間戳
        let timestamp = self.clock.timestamp();
        let renderer = HostsRenderer::new(self.config.update_base_url(), &timestamp);

        Ok(TransformResult {
            artifacts: renderer.build_artifacts(&reports),
            groups: reports.len(),
            domains: reports.iter().map(|r| r.entries.len()).sum(),
            resolved: reports.iter().map(|r| r.resolved_count()).sum(),
        })
    }

    async fn load(&self, artifacts: HostsArtifacts) -> Result<Vec<String>> {
        let mut written = Vec::new();
        let mut failures = Vec::new();

        for artifact in artifacts.iter() {
            match self
                .storage
                .write_file(&artifact.name, artifact.contents.as_bytes())
                .await
            {
                Ok(()) => {
                    tracing::info!("📝 {} written", artifact.name);
                    written.push(artifact.name.clone());
                }
                Err(e) => {
                    tracing::error!("❌ Failed to write {}: {}", artifact.name, e);
                    failures.push(format!("{}: {}", artifact.name, e));
                }
            }
        }

        if failures.is_empty() {
            Ok(written)
        } else {
            Err(HostsError::ArtifactWriteError { failures })
        }
    }
}
