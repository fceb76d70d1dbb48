//! Server configuration.
//!
//! Values come from an optional YAML file (path in `LABSERVER_CONFIG`),
//! with `LISTEN` overriding the listen address. Every key has a default,
//! so an empty file or no file at all yields a working server.

use anyhow::Context;
use serde::Deserialize;

/// Env var naming the YAML config file.
pub const CONFIG_PATH_ENV: &str = "LABSERVER_CONFIG";

/// Env var overriding `server.listen_addr`.
pub const LISTEN_ENV: &str = "LISTEN";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

/// Listening socket settings used by the dispatcher.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. "0.0.0.0:7000"
    pub listen_addr: String,
    /// SO_LINGER grace period applied to accepted sockets; `None` disables it
    pub linger_secs: Option<u64>,
}

/// Settings shared read-only by every connection handler.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Prefix concatenated with the request target to locate a file
    pub root: String,
    /// Value of the `Server` response header
    pub server_name: String,
    /// Upper bound on the request line plus headers
    pub max_request_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:7000".to_string(),
            linger_secs: Some(5),
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            server_name: "Labbserver".to_string(),
            max_request_bytes: 8192,
        }
    }
}

impl Config {
    /// Loads the config file named by `LABSERVER_CONFIG` (if any) and
    /// applies the `LISTEN` override.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {}", path))?;
                Self::from_yaml_str(&raw)
                    .with_context(|| format!("parsing config file {}", path))?
            }
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var(LISTEN_ENV) {
            cfg.server.listen_addr = addr;
        }

        Ok(cfg)
    }

    pub fn from_yaml_str(raw: &str) -> anyhow::Result<Self> {
        // serde_yaml maps an empty document to unit, not to an empty mapping
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(raw)?;
        Ok(cfg)
    }
}
