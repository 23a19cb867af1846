use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::hosts::SourcePaths;

/// Optional overrides read from `sshpick.toml`. Every key may be omitted.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub ssh_config: Option<PathBuf>,
    pub system_ssh_config: Option<PathBuf>,
    pub ssh_config_dir: Option<PathBuf>,
    pub known_hosts: Option<PathBuf>,
    pub hosts_file: Option<PathBuf>,
    /// Pre-filled into the extra options field.
    pub default_options: Option<String>,
}

impl AppConfig {
    pub fn source_paths(&self) -> SourcePaths {
        let ssh_dir = dirs::home_dir().unwrap_or_default().join(".ssh");
        SourcePaths {
            ssh_config: self
                .ssh_config
                .clone()
                .unwrap_or_else(|| ssh_dir.join("config")),
            system_ssh_config: self
                .system_ssh_config
                .clone()
                .unwrap_or_else(|| PathBuf::from("/etc/ssh/ssh_config")),
            ssh_config_dir: self
                .ssh_config_dir
                .clone()
                .unwrap_or_else(|| ssh_dir.join("config.d")),
            known_hosts: self
                .known_hosts
                .clone()
                .unwrap_or_else(|| ssh_dir.join("known_hosts")),
            hosts_file: self
                .hosts_file
                .clone()
                .unwrap_or_else(|| PathBuf::from("/etc/hosts")),
        }
    }
}

#[derive(Debug)]
pub struct ConfigManager {
    config_file: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sshpick");
        Ok(Self {
            config_file: config_dir.join("sshpick.toml"),
        })
    }

    pub fn with_file(config_file: PathBuf) -> Self {
        Self { config_file }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_file
    }

    /// A missing file means defaults; nothing is written back.
    pub fn load_config(&self) -> Result<AppConfig> {
        if !self.config_file.exists() {
            tracing::debug!("No config at {:?}, using defaults", self.config_file);
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file)
            .with_context(|| format!("Failed to read config file {:?}", self.config_file))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", self.config_file))?;

        tracing::info!("Loaded config from {:?}", self.config_file);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_file(dir.path().join("sshpick.toml"));
        assert_eq!(manager.load_config().unwrap(), AppConfig::default());
        assert!(!manager.config_path().exists());
    }

    #[test]
    fn partial_file_overrides_only_given_paths() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("sshpick.toml");
        fs::write(
            &file,
            "hosts_file = \"/tmp/hosts\"\ndefault_options = \"-A\"\n",
        )
        .unwrap();

        let config = ConfigManager::with_file(file).load_config().unwrap();
        assert_eq!(config.default_options.as_deref(), Some("-A"));

        let paths = config.source_paths();
        assert_eq!(paths.hosts_file, PathBuf::from("/tmp/hosts"));
        assert_eq!(paths.system_ssh_config, PathBuf::from("/etc/ssh/ssh_config"));
        assert!(paths.known_hosts.ends_with(".ssh/known_hosts"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("sshpick.toml");
        fs::write(&file, "hosts_file = [").unwrap();
        assert!(ConfigManager::with_file(file).load_config().is_err());
    }
}
