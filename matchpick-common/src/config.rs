//! Configuration loading and resolution
//!
//! Each setting resolves in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (process environment, then a `.env` file)
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing or malformed config file never stops startup; it is logged and
//! the remaining tiers apply.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::{Error, Result};

pub const DEFAULT_PORT: u16 = 3030;
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_DATA_FILE: &str = "data.json";

pub const PORT_ENV: &str = "PORT";
pub const DATA_FILE_ENV: &str = "MATCHPICK_DATA_FILE";
pub const BIND_ENV: &str = "MATCHPICK_BIND";

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TomlConfig {
    pub port: Option<u16>,
    pub data_file: Option<PathBuf>,
    pub bind: Option<String>,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub data_file: Option<PathBuf>,
    pub bind: Option<String>,
    /// Explicit config file; skips the platform search
    pub config_file: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub bind: String,
    pub port: u16,
    pub data_file: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl ServiceConfig {
    /// Resolve every setting through the four tiers
    pub fn resolve(overrides: &ConfigOverrides) -> Self {
        let file = match &overrides.config_file {
            Some(path) => load_or_warn(path),
            None => find_config_file()
                .map(|path| load_or_warn(&path))
                .unwrap_or_default(),
        };
        Self::merge(overrides, &file)
    }

    /// Merge CLI overrides, environment and a loaded TOML file over defaults
    pub fn merge(overrides: &ConfigOverrides, file: &TomlConfig) -> Self {
        let defaults = Self::default();

        let port = overrides
            .port
            .or_else(env_port)
            .or(file.port)
            .unwrap_or(defaults.port);

        let data_file = overrides
            .data_file
            .clone()
            .or_else(|| env_nonempty(DATA_FILE_ENV).map(PathBuf::from))
            .or_else(|| file.data_file.clone())
            .unwrap_or(defaults.data_file);

        let bind = overrides
            .bind
            .clone()
            .or_else(|| env_nonempty(BIND_ENV))
            .or_else(|| file.bind.clone())
            .unwrap_or(defaults.bind);

        Self {
            bind,
            port,
            data_file,
        }
    }

    /// Socket address to listen on
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind
            .parse()
            .map_err(|e| Error::Config(format!("Invalid bind address {:?}: {}", self.bind, e)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Load variables from a `.env` file without overriding the process environment
///
/// With no explicit path, `.env` is searched for in the working directory and
/// its parents. Returns the file that was loaded, `None` when there is none.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(Error::Config(format!("Invalid .env file: {}", e))),
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
}

fn load_or_warn(path: &Path) -> TomlConfig {
    match load_toml_config(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring config file {}: {}", path.display(), e);
            TomlConfig::default()
        }
    }
}

/// Locate the platform config file, if one exists
fn find_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("matchpick").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(unix) {
        let system_config = PathBuf::from("/etc/matchpick/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_port() -> Option<u16> {
    let raw = env_nonempty(PORT_ENV)?;
    match raw.trim().parse() {
        Ok(port) => Some(port),
        Err(_) => {
            warn!("Ignoring invalid {}={:?}", PORT_ENV, raw);
            None
        }
    }
}
