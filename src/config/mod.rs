//
//  bitbucket-proxy
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loading, saving and accessing the proxy's TOML configuration.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/bb-proxy/config.toml`
//! - **macOS**: `~/Library/Application Support/bb-proxy/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\bb-proxy\config.toml`
//!
//! The location can be overridden with `--config` or `BB_PROXY_CONFIG`.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//!
//! [upstream]
//! base_url = "https://api.bitbucket.org/2.0"
//! timeout_secs = 30
//! ```
//!
//! A missing file is not an error: every field has a default, and the
//! upstream call has no timeout unless `timeout_secs` is set.
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O operations

mod file;

pub use file::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

/// Base URL of the Bitbucket Cloud REST API v2.0.
pub const DEFAULT_API_URL: &str = "https://api.bitbucket.org/2.0";

/// Default listen address.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;

/// Keys accepted by [`Config::get`], [`Config::set`] and [`Config::unset`].
pub const VALID_KEYS: &[&str] = &[
    "server.host",
    "server.port",
    "upstream.base_url",
    "upstream.timeout_secs",
    "upstream.user_agent",
];

/// Global configuration container for the proxy.
///
/// # Examples
///
/// ```rust
/// use bitbucket_proxy::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.server.port, 8000);
/// assert_eq!(config.upstream.base_url, "https://api.bitbucket.org/2.0");
/// assert!(config.upstream.timeout().is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Outbound Bitbucket API settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

/// Where the proxy listens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Interface to bind, e.g. `127.0.0.1` or `0.0.0.0`.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Returns the `host:port` string handed to the TCP listener.
    ///
    /// IPv6 literals are bracketed, so `::1` becomes `[::1]:8000`.
    pub fn listen_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// How the proxy talks to Bitbucket.
///
/// # Default Values
///
/// | Field | Default |
/// |-------|---------|
/// | `base_url` | `https://api.bitbucket.org/2.0` |
/// | `timeout_secs` | `None` (wait indefinitely) |
/// | `user_agent` | `None` (`bb-proxy/<version>`) |
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpstreamConfig {
    /// Root of the Bitbucket REST API. Resource paths are appended to it.
    #[serde(default = "default_api_url")]
    pub base_url: String,

    /// Optional per-call timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Optional User-Agent override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl UpstreamConfig {
    /// Returns the configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Returns the User-Agent sent upstream.
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("{}/{}", crate::APP_NAME, crate::VERSION))
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// Returns [`Config::default`] when the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from an explicit path.
    ///
    /// Returns [`Config::default`] when the file does not exist. The loaded
    /// configuration is validated before it is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// contains an invalid `upstream.base_url`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Self::read_from(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses the file at `path` without validating values.
    ///
    /// Used when editing the file, so a bad value can still be corrected.
    /// Returns [`Config::default`] when the file does not exist.
    pub fn read_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = read_config_file(path)?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Returns the default configuration file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform has no home directory.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Checks values that serde alone cannot.
    ///
    /// # Errors
    ///
    /// Returns an error if `upstream.base_url` is not an absolute URL that
    /// can carry path segments.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.upstream.base_url)
            .with_context(|| format!("Invalid upstream.base_url '{}'", self.upstream.base_url))?;
        if url.cannot_be_a_base() {
            bail!(
                "Invalid upstream.base_url '{}': not a base URL",
                self.upstream.base_url
            );
        }
        Ok(())
    }

    /// Gets a configuration value by dotted key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bitbucket_proxy::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.get("server.port"), Some("8000".to_string()));
    /// assert_eq!(config.get("upstream.timeout_secs"), None);
    /// assert_eq!(config.get("unknown"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "server.host" => Some(self.server.host.clone()),
            "server.port" => Some(self.server.port.to_string()),
            "upstream.base_url" => Some(self.upstream.base_url.clone()),
            "upstream.timeout_secs" => self.upstream.timeout_secs.map(|t| t.to_string()),
            "upstream.user_agent" => self.upstream.user_agent.clone(),
            _ => None,
        }
    }

    /// Sets a configuration value by dotted key.
    ///
    /// Changes are only persisted when [`Config::save_to`] is called.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys and for values that do not parse
    /// (non-numeric port or timeout, invalid base URL).
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "server.host" => self.server.host = value.to_string(),
            "server.port" => {
                self.server.port = value
                    .parse()
                    .with_context(|| format!("Invalid port '{}'", value))?;
            }
            "upstream.base_url" => {
                let previous = std::mem::replace(&mut self.upstream.base_url, value.to_string());
                if let Err(err) = self.validate() {
                    self.upstream.base_url = previous;
                    return Err(err);
                }
            }
            "upstream.timeout_secs" => {
                self.upstream.timeout_secs = Some(
                    value
                        .parse()
                        .with_context(|| format!("Invalid timeout '{}'", value))?,
                );
            }
            "upstream.user_agent" => self.upstream.user_agent = Some(value.to_string()),
            _ => bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key,
                VALID_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Resets a configuration value to its default.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "server.host" => self.server.host = default_host(),
            "server.port" => self.server.port = default_port(),
            "upstream.base_url" => self.upstream.base_url = default_api_url(),
            "upstream.timeout_secs" => self.upstream.timeout_secs = None,
            "upstream.user_agent" => self.upstream.user_agent = None,
            _ => bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key,
                VALID_KEYS.join(", ")
            ),
        }
        Ok(())
    }
}
