use crate::domain::model::{DomainGroup, HostsArtifacts, LookupError, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

/// Destination for rendered artifacts.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn domain_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn concurrency(&self) -> usize;
    fn lookup_timeout(&self) -> Duration;
    fn update_base_url(&self) -> &str;
}

/// Raw IPv4 address lookup. May fail; callers go through
/// [`crate::core::resolver::resolve_domain`] which never does.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn lookup_ipv4(&self, domain: &str) -> std::result::Result<Vec<Ipv4Addr>, LookupError>;
}

#[async_trait]
impl<R: Resolver + ?Sized> Resolver for Arc<R> {
    async fn lookup_ipv4(&self, domain: &str) -> std::result::Result<Vec<Ipv4Addr>, LookupError> {
        (**self).lookup_ipv4(domain).await
    }
}

pub trait TimestampProvider: Send + Sync {
    fn timestamp(&self) -> String;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<DomainGroup>>;
    async fn transform(&self, groups: Vec<DomainGroup>) -> Result<TransformResult>;
    async fn load(&self, artifacts: HostsArtifacts) -> Result<Vec<String>>;
}
