use crate::core::aggregator::DEFAULT_UPDATE_BASE_URL;
use crate::core::scheduler::DEFAULT_CONCURRENCY;
use crate::core::ConfigProvider;
use crate::utils::error::{HostsError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECONDS: u64 = 5;

/// `hosts.toml` 設定檔，每個區段皆可省略
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_domain_file")]
    pub domain_file: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            domain_file: default_domain_file(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub concurrency: Option<usize>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
    #[serde(default = "default_update_base_url")]
    pub update_base_url: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            update_base_url: default_update_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `compact` or `json`
    pub format: Option<String>,
}

fn default_domain_file() -> String {
    "domain.json".to_string()
}

fn default_output_path() -> String {
    ".".to_string()
}

fn default_update_base_url() -> String {
    DEFAULT_UPDATE_BASE_URL.to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HostsError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOSTS_OUTPUT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HostsError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn concurrency(&self) -> usize {
        self.resolver.concurrency.unwrap_or(DEFAULT_CONCURRENCY)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.resolver
            .timeout_seconds
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn domain_file(&self) -> &str {
        &self.source.domain_file
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn concurrency(&self) -> usize {
        self.concurrency()
    }

    fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds())
    }

    fn update_base_url(&self) -> &str {
        &self.output.update_base_url
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_settings(
            &self.source.domain_file,
            &self.output.path,
            self.concurrency(),
            self.timeout_seconds(),
            &self.output.update_base_url,
        )?;

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            if !["compact", "json"].contains(&format.to_ascii_lowercase().as_str()) {
                return Err(HostsError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: "Valid formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[source]
domain_file = "lists/domain.json"

[resolver]
concurrency = 4
timeout_seconds = 2

[output]
path = "./public"
update_base_url = "https://example.com/hosts"

[logging]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.domain_file(), "lists/domain.json");
        assert_eq!(config.output_path(), "./public");
        assert_eq!(ConfigProvider::concurrency(&config), 4);
        assert_eq!(config.lookup_timeout(), Duration::from_secs(2));
        assert_eq!(config.update_base_url(), "https://example.com/hosts");
        assert!(config.json_logging());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.domain_file(), "domain.json");
        assert_eq!(config.output_path(), ".");
        assert_eq!(ConfigProvider::concurrency(&config), 10);
        assert_eq!(config.lookup_timeout(), Duration::from_secs(5));
        assert_eq!(config.update_base_url(), DEFAULT_UPDATE_BASE_URL);
        assert!(!config.json_logging());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HOSTS_TEST_OUTPUT_DIR", "/tmp/hosts-out");

        let toml_content = r#"
[output]
path = "${HOSTS_TEST_OUTPUT_DIR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_path(), "/tmp/hosts-out");

        std::env::remove_var("HOSTS_TEST_OUTPUT_DIR");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[resolver]
concurrency = 0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[output]
update_base_url = "not-a-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[logging]
format = "xml"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            TomlConfig::from_toml_str("[resolver\nconcurrency = 1"),
            Err(HostsError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\ndomain_file = \"custom.json\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.domain_file(), "custom.json");
    }
}
