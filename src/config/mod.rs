pub mod cli;
pub mod domains;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::aggregator::DEFAULT_UPDATE_BASE_URL;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::{error::Result, validation};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use std::time::Duration;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "hosts-updater")]
#[command(about = "Resolve grouped domain lists into hosts files")]
pub struct CliConfig {
    /// JSON file mapping group names to domain arrays
    #[arg(long, default_value = "domain.json")]
    pub domain_file: String,

    #[arg(long, default_value = ".")]
    pub output_path: String,

    /// Maximum lookups in flight at once
    #[arg(long, default_value = "10")]
    pub concurrency: usize,

    /// Per-domain lookup timeout
    #[arg(long, default_value = "5")]
    pub timeout_secs: u64,

    #[arg(long, default_value = DEFAULT_UPDATE_BASE_URL)]
    pub update_base_url: String,

    /// Resolve and print the combined hosts file without writing anything
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn domain_file(&self) -> &str {
        &self.domain_file
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn concurrency(&self) -> usize {
        self.concurrency
    }

    fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn update_base_url(&self) -> &str {
        &self.update_base_url
    }
}

#[cfg(feature = "cli")]
impl validation::Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_settings(
            &self.domain_file,
            &self.output_path,
            self.concurrency,
            self.timeout_secs,
            &self.update_base_url,
        )
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["hosts-updater"]);
        assert_eq!(config.domain_file, "domain.json");
        assert_eq!(config.output_path, ".");
        assert_eq!(config.concurrency(), 10);
        assert_eq!(config.lookup_timeout(), Duration::from_secs(5));
        assert_eq!(config.update_base_url(), DEFAULT_UPDATE_BASE_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_rejects_zero_concurrency() {
        let config = CliConfig::parse_from(["hosts-updater", "--concurrency", "0"]);
        assert!(config.validate().is_err());
    }
}
