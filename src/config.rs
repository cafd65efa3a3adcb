use crate::aggregator::RESULT_CAP;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener
    pub server: ServerConfig,

    /// Upstream providers
    pub sources: SourcesConfig,

    /// Aggregation settings
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    pub coingecko_base_url: String,
    pub cryptopanic_base_url: String,
    pub cryptopanic_api_key: Option<String>,
    pub newsapi_base_url: String,
    pub newsapi_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub max_results: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            sources: SourcesConfig {
                coingecko_base_url: "https://api.coingecko.com/api/v3".to_string(),
                cryptopanic_base_url: "https://cryptopanic.com/api/v1".to_string(),
                cryptopanic_api_key: None,
                newsapi_base_url: "https://newsapi.org/v2".to_string(),
                newsapi_key: None,
                timeout_secs: 10,
            },
            search: SearchConfig { max_results: 10 },
        }
    }
}

impl SourcesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cryptopanic_enabled(&self) -> bool {
        self.cryptopanic_api_key.is_some()
    }

    pub fn newsapi_enabled(&self) -> bool {
        self.newsapi_key.is_some()
    }
}

impl Config {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup on top of the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Empty values count as unset, so an exported-but-blank key disables the source
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(host) = get("HOST") {
            config.server.host = host;
        }

        if let Some(port) = get("PORT") {
            config.server.port = port
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("Invalid PORT '{port}': {e}")))?;
        }

        config.sources.cryptopanic_api_key = get("CRYPTOPANIC_API_KEY");
        config.sources.newsapi_key = get("NEWSAPI_KEY");

        if let Some(url) = get("COINGECKO_BASE_URL") {
            config.sources.coingecko_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(url) = get("CRYPTOPANIC_BASE_URL") {
            config.sources.cryptopanic_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(url) = get("NEWSAPI_BASE_URL") {
            config.sources.newsapi_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(timeout) = get("SOURCE_TIMEOUT_SECS") {
            config.sources.timeout_secs = timeout.trim().parse().map_err(|e| {
                Error::Config(format!("Invalid SOURCE_TIMEOUT_SECS '{timeout}': {e}"))
            })?;
        }

        if let Some(max) = get("MAX_RESULTS") {
            let parsed: usize = max
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("Invalid MAX_RESULTS '{max}': {e}")))?;
            if !(1..=RESULT_CAP).contains(&parsed) {
                return Err(Error::Config(format!(
                    "MAX_RESULTS must be between 1 and {RESULT_CAP}, got {parsed}"
                )));
            }
            config.search.max_results = parsed;
        }

        Ok(config)
    }
}
