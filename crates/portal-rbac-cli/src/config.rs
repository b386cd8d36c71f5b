use anyhow::{Context, Result};
use portal_rbac::FALLBACK_ROLE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalRbacConfig {
    /// tracing filter directive, e.g. "info" or "portal_rbac=debug"
    pub log_filter: String,
    /// Role used when a command is given no --role and the session carries none
    pub default_role: String,
    /// Treat loaded sessions as restored from storage
    pub assume_hydrated: bool,
}

impl Default for PortalRbacConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            default_role: FALLBACK_ROLE.to_string(),
            assume_hydrated: true,
        }
    }
}

impl PortalRbacConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn resolve_config(cli_config: Option<PathBuf>) -> Result<Self> {
        let mut config = if let Some(config_path) = cli_config {
            Self::load_from_file(config_path)?
        } else if let Ok(env_config) = std::env::var("PORTAL_RBAC_CONFIG") {
            Self::load_from_file(env_config)?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(filter) = lookup("PORTAL_RBAC_LOG") {
            self.log_filter = filter;
        }
        if let Some(role) = lookup("PORTAL_RBAC_DEFAULT_ROLE") {
            self.default_role = role;
        }
    }
}
