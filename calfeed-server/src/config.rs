//! Server configuration.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. `~/.config/calfeed/config.toml` (optional)
//! 3. the file passed with `--config` (required if given)
//! 4. `CALFEED_*` environment variables, e.g. `CALFEED_API_SECRET`

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 4096;
pub const DEFAULT_KEY_PREFIX: &str = "cal";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
const DEFAULT_MAX_FEED_BYTES: u64 = 10 * 1024 * 1024;

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_key_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

fn default_max_feed_bytes() -> u64 {
    DEFAULT_MAX_FEED_BYTES
}

fn default_user_agent() -> String {
    format!("calfeed/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Secret API keys are signed with. Without one, authentication is off.
    #[serde(default)]
    pub api_secret: Option<String>,

    #[serde(default = "default_key_prefix")]
    pub api_key_prefix: String,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Largest feed body accepted, in bytes
    #[serde(default = "default_max_feed_bytes")]
    pub max_feed_bytes: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
            api_secret: None,
            api_key_prefix: default_key_prefix(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            max_feed_bytes: default_max_feed_bytes(),
            user_agent: default_user_agent(),
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field("api_key_prefix", &self.api_key_prefix)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("max_feed_bytes", &self.max_feed_bytes)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ServerConfig {
    /// Default config file location, if the platform has a config directory.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("calfeed").join("config.toml"))
    }

    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(default_path) = Self::config_path() {
            builder = builder.add_source(File::from(default_path).required(false));
        }
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(Environment::with_prefix("CALFEED").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// The configured secret, ignoring blank values.
    pub fn api_secret(&self) -> Option<&str> {
        self.api_secret
            .as_deref()
            .map(str::trim)
            .filter(|secret| !secret.is_empty())
    }
}
