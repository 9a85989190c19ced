use crate::domain::model::DomainGroup;
use crate::utils::error::{HostsError, Result};
use std::path::Path;

/// 解析 `{ "群組": ["網域", ...] }` 格式，保留鍵的順序
pub fn parse_domain_groups(bytes: &[u8]) -> Result<Vec<DomainGroup>> {
    let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(bytes)?;

    raw.into_iter()
        .map(|(name, value)| {
            let domains: Vec<String> =
                serde_json::from_value(value).map_err(|e| HostsError::ConfigError {
                    message: format!("group '{}' must be an array of domain names: {}", name, e),
                })?;
            Ok(DomainGroup::new(name, domains))
        })
        .collect()
}

/// Loads the domain list. A missing or malformed file yields no groups.
pub async fn load_domain_groups<P: AsRef<Path>>(path: P) -> Vec<DomainGroup> {
    let path = path.as_ref();
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("⚠️ Domain file {} could not be read: {}", path.display(), e);
            return Vec::new();
        }
    };

    match parse_domain_groups(&bytes) {
        Ok(groups) => {
            tracing::info!(
                "📋 Loaded {} groups ({} domains) from {}",
                groups.len(),
                groups.iter().map(|g| g.domains.len()).sum::<usize>(),
                path.display()
            );
            groups
        }
        Err(e) => {
            tracing::warn!("⚠️ Domain file {} is malformed: {}", path.display(), e);
            Vec::new()
        }
    }
}
