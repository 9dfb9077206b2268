//! Server inventory, read from `~/.config/wpsh/config.json`.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

fn default_port() -> u16 {
    22
}

fn default_php_bin() -> String {
    wp_adapter::DEFAULT_PHP_BIN.to_string()
}

fn default_wp_cli() -> String {
    wp_adapter::DEFAULT_WP_CLI.to_string()
}

/// One remote WordPress installation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// SSH host name or address.
    pub hostname: String,
    /// SSH login user.
    pub username: String,
    /// SSH port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Private key file passed to ssh with `-i`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_file: Option<String>,
    /// WordPress installation directory on the remote host.
    pub wp_path: String,
    /// Remote PHP interpreter.
    #[serde(default = "default_php_bin")]
    pub php_bin: String,
    /// Remote WP-CLI binary path.
    #[serde(default = "default_wp_cli")]
    pub wp_cli: String,
}

/// Full wpsh configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Named servers.
    #[serde(default)]
    pub servers: BTreeMap<String, ServerConfig>,
    /// Server used when `--server` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_server: Option<String>,
}

impl Config {
    /// Default config file location.
    pub fn path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir().context("could not determine config directory")?;
        Ok(config_dir.join("wpsh").join("config.json"))
    }

    /// Loads the configuration from the default location.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Loads the configuration from `path`.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            bail!(
                "no config found at {} (run `wpsh init` to create one)",
                path.display()
            );
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("invalid config at {}", path.display()))?;
        Ok(config)
    }

    /// Writes the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Resolves a server by name, falling back to `default_server`, then to
    /// the single configured server when there is exactly one.
    pub fn server<'a>(&'a self, name: Option<&'a str>) -> anyhow::Result<(&'a str, &'a ServerConfig)> {
        let name = match name {
            Some(name) => name,
            None => match &self.default_server {
                Some(default) => default.as_str(),
                None if self.servers.len() == 1 => {
                    self.servers.keys().next().map(String::as_str).unwrap_or_default()
                }
                None => bail!(
                    "no server specified: pass --server or set \"default_server\" in the config"
                ),
            },
        };
        let server = self
            .servers
            .get(name)
            .with_context(|| format!("server '{name}' is not in the config"))?;
        Ok((name, server))
    }

    /// A starter configuration with one placeholder server.
    #[must_use]
    pub fn starter() -> Self {
        let mut servers = BTreeMap::new();
        servers.insert(
            "production".to_string(),
            ServerConfig {
                hostname: "wp.example.com".to_string(),
                username: "deploy".to_string(),
                port: 22,
                identity_file: None,
                wp_path: "/var/www/html".to_string(),
                php_bin: default_php_bin(),
                wp_cli: default_wp_cli(),
            },
        );
        Self {
            servers,
            default_server: Some("production".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_config_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config::starter();
        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded.default_server.as_deref(), Some("production"));
        let server = &loaded.servers["production"];
        assert_eq!(server.hostname, "wp.example.com");
        assert_eq!(server.port, 22);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let json = r#"{
            "servers": {
                "staging": {
                    "hostname": "staging.example.com",
                    "username": "deploy",
                    "wp_path": "/srv/wp"
                }
            }
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        let server = &config.servers["staging"];
        assert_eq!(server.port, 22);
        assert_eq!(server.php_bin, "php");
        assert_eq!(server.wp_cli, "/usr/local/bin/wp");
        assert!(server.identity_file.is_none());
    }

    #[test]
    fn server_resolution_prefers_explicit_then_default() {
        let mut config = Config::starter();
        config.servers.insert(
            "staging".to_string(),
            config.servers["production"].clone(),
        );

        let (name, _) = config.server(Some("staging")).unwrap();
        assert_eq!(name, "staging");
        let (name, _) = config.server(None).unwrap();
        assert_eq!(name, "production");
    }

    #[test]
    fn sole_server_is_the_implicit_default() {
        let mut config = Config::starter();
        config.default_server = None;

        let (name, _) = config.server(None).unwrap();
        assert_eq!(name, "production");
    }

    #[test]
    fn unknown_server_is_an_error() {
        let config = Config::starter();
        assert!(config.server(Some("nowhere")).is_err());
    }

    #[test]
    fn missing_file_reports_init_hint() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("config.json")).unwrap_err();
        assert!(err.to_string().contains("wpsh init"));
    }
}
