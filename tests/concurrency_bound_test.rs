use async_trait::async_trait;
use hosts_updater::core::{DomainGroup, Resolver};
use hosts_updater::domain::model::{LookupError, ResolutionResult};
use hosts_updater::BatchScheduler;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Counts how many lookups are in flight at once.
#[derive(Default)]
struct TrackingResolver {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

#[async_trait]
impl Resolver for TrackingResolver {
    async fn lookup_ipv4(&self, domain: &str) -> Result<Vec<Ipv4Addr>, LookupError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(15)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if domain.starts_with("bad") {
            Err(LookupError::Failed {
                domain: domain.to_string(),
                message: "SERVFAIL".to_string(),
            })
        } else {
            Ok(vec![Ipv4Addr::new(192, 0, 2, 1)])
        }
    }
}

fn groups(count_per_group: usize) -> Vec<DomainGroup> {
    ["Alpha", "Beta", "Gamma"]
        .iter()
        .map(|name| {
            DomainGroup::new(
                *name,
                (0..count_per_group)
                    .map(|i| {
                        if i % 5 == 0 {
                            format!("bad{}.{}.test", i, name.to_lowercase())
                        } else {
                            format!("d{}.{}.test", i, name.to_lowercase())
                        }
                    })
                    .collect(),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_in_flight_lookups_never_exceed_pool_size() {
    let resolver = Arc::new(TrackingResolver::default());
    let scheduler = BatchScheduler::new(resolver.clone(), 4, Duration::from_secs(2));

    let input = groups(10);
    let reports = scheduler.resolve_all(&input).await;

    assert_eq!(resolver.calls.load(Ordering::SeqCst), 30);
    let peak = resolver.peak.load(Ordering::SeqCst);
    assert!(peak <= 4, "peak concurrency {} exceeded pool size", peak);
    // 池子是跨群組共用的
    assert!(peak > 1, "lookups were serialized");
    assert_eq!(resolver.in_flight.load(Ordering::SeqCst), 0);

    assert_eq!(reports.len(), 3);
    for (report, group) in reports.iter().zip(&input) {
        assert_eq!(report.name, group.name);
        let domains: Vec<_> = report.entries.iter().map(|e| e.domain.clone()).collect();
        assert_eq!(domains, group.domains);
    }
}

#[tokio::test]
async fn test_failures_do_not_abort_the_batch() {
    let resolver = Arc::new(TrackingResolver::default());
    let scheduler = BatchScheduler::new(resolver.clone(), 10, Duration::from_secs(2));

    let reports = scheduler.resolve_all(&groups(10)).await;

    let (failed, resolved): (Vec<_>, Vec<_>) = reports
        .iter()
        .flat_map(|r| r.entries.iter())
        .partition(|e| e.domain.starts_with("bad"));

    assert_eq!(failed.len(), 6);
    assert!(failed
        .iter()
        .all(|e| matches!(e.result, ResolutionResult::Unresolved(LookupError::Failed { .. }))));
    assert_eq!(resolved.len(), 24);
    assert!(resolved.iter().all(|e| e.result.is_resolved()));
}

#[tokio::test]
async fn test_single_worker_serializes_lookups() {
    let resolver = Arc::new(TrackingResolver::default());
    let scheduler = BatchScheduler::new(resolver.clone(), 1, Duration::from_secs(2));

    scheduler.resolve_all(&groups(3)).await;

    assert_eq!(resolver.peak.load(Ordering::SeqCst), 1);
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 9);
}
