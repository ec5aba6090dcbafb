use super::schema::SuiteConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from default locations:
    /// 1. ./magpie.yaml
    /// 2. ~/.magpie/config.yaml
    /// 3. Default configuration
    ///
    /// A `BASE_URL` environment variable overrides the configured base URL
    /// in every case.
    pub async fn load_default() -> Result<SuiteConfig, ConfigError> {
        let local_config = PathBuf::from("./magpie.yaml");
        if local_config.exists() {
            return Ok(Self::apply_env(Self::load_from(&local_config).await?));
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".magpie").join("config.yaml");
            if home_config.exists() {
                return Ok(Self::apply_env(Self::load_from(&home_config).await?));
            }
        }

        Ok(Self::apply_env(SuiteConfig::default()))
    }

    pub async fn load_from(path: &Path) -> Result<SuiteConfig, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: SuiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    fn apply_env(mut config: SuiteConfig) -> SuiteConfig {
        if let Ok(url) = std::env::var("BASE_URL") {
            config.base_url = url;
        }
        config
    }
}
