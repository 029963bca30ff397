//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::config::AssistantConfig;

/// Environment variable overriding the configuration path.
pub const CONFIG_ENV: &str = "GECOS_ASSISTANT_CONFIG";

/// System-wide configuration path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/gecos-assistant/config.yaml";

/// Production implementation of `ConfigStore` that reads a YAML file.
///
/// Resolution order: explicit path (`--config`), `GECOS_ASSISTANT_CONFIG`,
/// then [`DEFAULT_CONFIG_PATH`].
#[derive(Debug, Default)]
pub struct YamlConfigStore {
    explicit: Option<PathBuf>,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<AssistantConfig> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(AssistantConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let config: AssistantConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.explicit {
            return Ok(path.clone());
        }
        if let Some(val) = std::env::var(CONFIG_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
        {
            return Ok(PathBuf::from(val));
        }
        Ok(PathBuf::from(DEFAULT_CONFIG_PATH))
    }
}
