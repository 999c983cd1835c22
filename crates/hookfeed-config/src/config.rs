use crate::constants;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct HookfeedConfig {
    #[serde(default = "default_api_host")]
    pub api_host: String,

    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Postgres connection string. Without one, events live in memory only.
    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for HookfeedConfig {
    fn default() -> Self {
        Self {
            api_host: default_api_host(),
            api_port: default_api_port(),
            database_url: None,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl HookfeedConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    /// Applies `API_HOST`, `API_PORT`, `DATABASE_URL` and `MAX_BODY_BYTES`
    /// from the process environment.
    pub fn apply_env(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(host) = lookup("API_HOST") {
            self.api_host = host;
        }

        if let Some(port) = lookup("API_PORT") {
            match port.parse() {
                Ok(port) => self.api_port = port,
                Err(_) => warn!("Ignoring invalid API_PORT: {}", port),
            }
        }

        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            self.database_url = Some(url);
        }

        if let Some(limit) = lookup("MAX_BODY_BYTES") {
            match limit.parse() {
                Ok(limit) => self.max_body_bytes = limit,
                Err(_) => warn!("Ignoring invalid MAX_BODY_BYTES: {}", limit),
            }
        }

        self
    }
}

fn default_api_host() -> String {
    constants::DEFAULT_API_HOST.to_string()
}

fn default_api_port() -> u16 {
    constants::DEFAULT_API_PORT
}

fn default_max_body_bytes() -> usize {
    constants::DEFAULT_MAX_BODY_BYTES
}

/// Reads the TOML config file, falling back to defaults when it does not exist.
pub async fn load_config(path: &Path) -> std::io::Result<HookfeedConfig> {
    if !tokio::fs::try_exists(path).await? {
        info!("No config file at {}, using defaults", path.display());
        return Ok(HookfeedConfig::default());
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: HookfeedConfig = toml::from_str(&content)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    Ok(config)
}
