pub mod coingecko;
pub mod coins;
pub mod cryptopanic;
pub mod newsapi;

use crate::config::SourcesConfig;
use crate::{Error, Result, SearchResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub use coingecko::{CoinGeckoPrices, CoinGeckoTrending};
pub use cryptopanic::CryptoPanic;
pub use newsapi::NewsApi;

/// Result of asking one source for hits.
///
/// A failed source is reported here instead of through `Err`, so a caller
/// cannot accidentally abort the whole search on one provider.
#[derive(Debug)]
pub enum FetchOutcome {
    Hits(Vec<SearchResult>),
    Failed { source: String, error: Error },
}

impl FetchOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed { .. })
    }

    /// Hits, or nothing if the source failed. Failures are logged here.
    pub fn into_results(self) -> Vec<SearchResult> {
        match self {
            FetchOutcome::Hits(results) => results,
            FetchOutcome::Failed { source, error } => {
                tracing::warn!("[SOURCE] {} failed, skipping: {}", source, error);
                Vec::new()
            }
        }
    }
}

#[async_trait]
pub trait Source: Send + Sync {
    fn name(&self) -> &str;

    async fn try_fetch(&self, query: &str) -> Result<Vec<SearchResult>>;

    async fn fetch(&self, query: &str) -> FetchOutcome {
        match self.try_fetch(query).await {
            Ok(results) => {
                tracing::info!("[SOURCE] {} returned {} results", self.name(), results.len());
                FetchOutcome::Hits(results)
            }
            Err(error) => FetchOutcome::Failed {
                source: self.name().to_string(),
                error,
            },
        }
    }
}

/// Build the sources enabled by `config`, in aggregation order
pub fn build_sources(config: &SourcesConfig) -> Result<Vec<Arc<dyn Source>>> {
    let client = http_client(config)?;

    let mut sources: Vec<Arc<dyn Source>> = vec![Arc::new(CoinGeckoTrending::new(
        client.clone(),
        config.coingecko_base_url.clone(),
    ))];

    if let Some(api_key) = &config.cryptopanic_api_key {
        sources.push(Arc::new(CryptoPanic::new(
            client.clone(),
            config.cryptopanic_base_url.clone(),
            api_key.clone(),
        )));
    }

    sources.push(Arc::new(CoinGeckoPrices::new(
        client.clone(),
        config.coingecko_base_url.clone(),
    )));

    if let Some(api_key) = &config.newsapi_key {
        sources.push(Arc::new(NewsApi::new(
            client,
            config.newsapi_base_url.clone(),
            api_key.clone(),
        )));
    }

    Ok(sources)
}

pub fn http_client(config: &SourcesConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout())
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(Error::from)
}

/// GET `url` with `query` params and decode a JSON body, failing on non-2xx
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T> {
    let response = client.get(url).query(query).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        return Err(Error::Upstream { status, body });
    }

    Ok(response.json().await?)
}

/// Render a loosely typed provider field, `N/A` when absent
pub(crate) fn display_value(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => "N/A".to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
