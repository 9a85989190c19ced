//! Single-domain resolution.
//!
//! [`resolve_domain`] is the failure boundary: whatever the underlying
//! [`Resolver`] does (error, empty answer, hang), the caller gets a terminal
//! [`ResolutionResult`] and the cause is logged.

use crate::domain::model::{LookupError, ResolutionResult};
use crate::domain::ports::Resolver;
use async_trait::async_trait;
use hickory_resolver::{
    config::{LookupIpStrategy, ResolverConfig},
    name_server::TokioConnectionProvider,
    TokioResolver,
};
use std::net::Ipv4Addr;
use std::time::Duration;

/// Resolves one domain, bounded by `timeout`.
///
/// An expired timeout becomes [`LookupError::TimedOut`] and an empty answer
/// becomes [`LookupError::NoRecords`].
pub async fn resolve_domain<R: Resolver + ?Sized>(
    resolver: &R,
    domain: &str,
    timeout: Duration,
) -> ResolutionResult {
    let outcome = match tokio::time::timeout(timeout, resolver.lookup_ipv4(domain)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(LookupError::TimedOut {
            domain: domain.to_string(),
            timeout_ms: timeout.as_millis(),
        }),
    };

    match outcome {
        Ok(addrs) if !addrs.is_empty() => {
            tracing::debug!(domain = %domain, count = addrs.len(), "resolved");
            ResolutionResult::Resolved(addrs)
        }
        Ok(_) => {
            let cause = LookupError::NoRecords {
                domain: domain.to_string(),
            };
            tracing::warn!(domain = %domain, error = %cause, "DNS lookup returned no addresses");
            ResolutionResult::Unresolved(cause)
        }
        Err(cause) => {
            tracing::warn!(domain = %domain, error = %cause, "DNS lookup failed");
            ResolutionResult::Unresolved(cause)
        }
    }
}

/// A-record resolver backed by hickory-dns.
///
/// Reads the system resolver configuration and falls back to hickory's
/// defaults when it is unavailable. Lookups are IPv4 only.
#[derive(Clone)]
pub struct HickoryResolver {
    resolver: TokioResolver,
}

impl HickoryResolver {
    pub fn new(timeout: Duration) -> Self {
        let mut builder = match TokioResolver::builder_tokio() {
            Ok(builder) => {
                tracing::debug!("Using system DNS configuration");
                builder
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read system DNS config, using defaults");
                TokioResolver::builder_with_config(
                    ResolverConfig::default(),
                    TokioConnectionProvider::default(),
                )
            }
        };

        let options = builder.options_mut();
        options.ip_strategy = LookupIpStrategy::Ipv4Only;
        options.timeout = timeout;

        Self {
            resolver: builder.build(),
        }
    }
}

#[async_trait]
impl Resolver for HickoryResolver {
    async fn lookup_ipv4(&self, domain: &str) -> Result<Vec<Ipv4Addr>, LookupError> {
        match self.resolver.ipv4_lookup(domain).await {
            Ok(lookup) => Ok(lookup.iter().map(|a| a.0).collect()),
            Err(e) if e.is_no_records_found() => Err(LookupError::NoRecords {
                domain: domain.to_string(),
            }),
            Err(e) => Err(LookupError::Failed {
                domain: domain.to_string(),
                message: e.to_string(),
            }),
        }
    }
}
