use anyhow::{anyhow, Result};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_SOLSCAN_BASE_URL: &str = "https://api.solscan.io";
pub const DEFAULT_API_KEY_ENV: &str = "SOLSCAN_API_KEY";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub solscan: SolscanConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SolscanConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Explicit key; when absent the variable named by `api_key_env` is read per request
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_SOLSCAN_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8081,
            },
            solscan: SolscanConfig {
                base_url: default_base_url(),
                api_key: None,
                api_key_env: default_api_key_env(),
                request_timeout_secs: None,
            },
        }
    }
}

impl SolscanConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(anyhow!("Solscan base URL not configured"));
        }

        Ok(())
    }

    /// Resolve the provider API key for the current request.
    ///
    /// An explicit `api_key` wins; otherwise the environment is consulted at call
    /// time. Empty values count as not configured.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.is_empty())
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        info!("Loading config from file");
        match Self::load_from_file(path) {
            Ok(config) => {
                info!("Config loaded from file");
                config
            }
            Err(e) => {
                error!("Failed to load config from file: {}", e);
                info!("Falling back to environment variables or defaults");
                Self::from_env()
            }
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(host) = std::env::var("SERVER_HOST") {
            config.server.host = host;
        }

        if let Ok(port) = std::env::var("SERVER_PORT") {
            if let Ok(port_num) = port.parse::<u16>() {
                config.server.port = port_num;
            }
        }

        if let Ok(base_url) = std::env::var("SOLSCAN_BASE_URL") {
            config.solscan.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("SOLSCAN_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse::<u64>() {
                config.solscan.request_timeout_secs = Some(secs);
            }
        }

        config
    }
}
