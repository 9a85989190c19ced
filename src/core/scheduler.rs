use crate::core::resolver::resolve_domain;
use crate::domain::model::{DomainGroup, DomainResolution, GroupReport, LookupError, ResolutionResult};
use crate::domain::ports::Resolver;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_CONCURRENCY: usize = 10;

/// Resolves every domain of every group through one shared, bounded pool of
/// in-flight lookups.
pub struct BatchScheduler<R: Resolver> {
    resolver: Arc<R>,
    concurrency: usize,
    timeout: Duration,
}

impl<R: Resolver> BatchScheduler<R> {
    pub fn new(resolver: Arc<R>, concurrency: usize, timeout: Duration) -> Self {
        Self {
            resolver,
            concurrency: concurrency.max(1),
            timeout,
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Returns one report per group, in input order, once every lookup has
    /// reached a terminal result. A domain repeated within a group keeps only
    /// its first position; repeats across groups are resolved separately.
    pub async fn resolve_all(&self, groups: &[DomainGroup]) -> Vec<GroupReport> {
        let members: Vec<Vec<String>> = groups.iter().map(distinct_domains).collect();

        // 攤平成提交序列，索引即結果槽位
        let jobs: Vec<(usize, String)> = members
            .iter()
            .flat_map(|domains| domains.iter().cloned())
            .enumerate()
            .collect();

        tracing::debug!(
            "Submitting {} lookups across {} groups (concurrency {})",
            jobs.len(),
            groups.len(),
            self.concurrency
        );

        let mut slots: Vec<Option<ResolutionResult>> = vec![None; jobs.len()];

        let resolver = self.resolver.as_ref();
        let timeout = self.timeout;
        let mut completed = stream::iter(jobs)
            .map(|(index, domain)| async move {
                (index, resolve_domain(resolver, &domain, timeout).await)
            })
            .buffer_unordered(self.concurrency);

        while let Some((index, result)) = completed.next().await {
            slots[index] = Some(result);
        }

        // 依原始分組順序取回
        let mut slots = slots.into_iter();
        groups
            .iter()
            .zip(members)
            .map(|(group, domains)| GroupReport {
                name: group.name.clone(),
                entries: domains
                    .into_iter()
                    .map(|domain| {
                        let result = slots.next().flatten().unwrap_or_else(|| {
                            ResolutionResult::Unresolved(LookupError::Failed {
                                domain: domain.clone(),
                                message: "lookup never completed".to_string(),
                            })
                        });
                        DomainResolution { domain, result }
                    })
                    .collect(),
            })
            .collect()
    }
}

fn distinct_domains(group: &DomainGroup) -> Vec<String> {
    let mut seen = HashSet::new();
    group
        .domains
        .iter()
        .filter(|domain| seen.insert(*domain))
        .cloned()
        .collect()
}
