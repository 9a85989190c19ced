use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use thiserror::Error;

/// 未解析網域在診斷輸出中的標記
pub const UNRESOLVED_MARKER: &str = "#";

/// A named group of domains. Domain order drives output order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainGroup {
    pub name: String,
    pub domains: Vec<String>,
}

impl DomainGroup {
    pub fn new(name: impl Into<String>, domains: Vec<String>) -> Self {
        Self {
            name: name.into(),
            domains,
        }
    }
}

/// Why a lookup produced no usable address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no A records for {domain}")]
    NoRecords { domain: String },

    #[error("lookup of {domain} failed: {message}")]
    Failed { domain: String, message: String },

    #[error("lookup of {domain} timed out after {timeout_ms}ms")]
    TimedOut { domain: String, timeout_ms: u128 },
}

/// Terminal outcome of resolving one domain occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionResult {
    /// Always non-empty.
    Resolved(Vec<Ipv4Addr>),
    Unresolved(LookupError),
}

impl ResolutionResult {
    /// Resolved addresses, empty when unresolved.
    pub fn addresses(&self) -> &[Ipv4Addr] {
        match self {
            ResolutionResult::Resolved(addrs) => addrs,
            ResolutionResult::Unresolved(_) => &[],
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionResult::Resolved(_))
    }
}

impl fmt::Display for ResolutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionResult::Resolved(addrs) => {
                let joined = addrs
                    .iter()
                    .map(|ip| ip.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                f.write_str(&joined)
            }
            ResolutionResult::Unresolved(_) => f.write_str(UNRESOLVED_MARKER),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainResolution {
    pub domain: String,
    pub result: ResolutionResult,
}

/// Resolution results of one group, in configuration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    pub name: String,
    pub entries: Vec<DomainResolution>,
}

impl GroupReport {
    pub fn resolved_count(&self) -> usize {
        self.entries.iter().filter(|e| e.result.is_resolved()).count()
    }
}

/// A named text blob ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostsArtifacts {
    pub groups: Vec<Artifact>,
    pub combined: Artifact,
}

impl HostsArtifacts {
    /// Group files first, combined file last.
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.groups.iter().chain(std::iter::once(&self.combined))
    }
}

/// Rendered output of a run plus its resolution counters.
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub artifacts: HostsArtifacts,
    pub groups: usize,
    pub domains: usize,
    pub resolved: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub groups: usize,
    pub domains: usize,
    pub resolved: usize,
    pub unresolved: usize,
    pub artifacts: Vec<String>,
}
