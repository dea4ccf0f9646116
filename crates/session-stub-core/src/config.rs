//! Server configuration.
//!
//! Configuration is read from a JSON file, either the path given on the
//! command line or `~/.config/session-stub/config.json` if present. Every
//! field has a default, so a missing file means "listen on 127.0.0.1:8545".

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for the config directory
const APP_NAME: &str = "session-stub";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8545;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Daily rolling log files are written here when set
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Load from `path`, or from the user config directory when no path is given.
    ///
    /// An explicit path must exist; the fallback location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.parse::<IpAddr>().is_err() {
            bail!("host invalid: {:?} is not an IP address", self.host);
        }
        if self.port == 0 {
            bail!("port invalid: must be between 1 and 65535");
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("host invalid: {:?}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

// ============================================================================
// Tests
// ============================================================================
