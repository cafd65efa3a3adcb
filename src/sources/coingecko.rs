//! CoinGecko trending coins and price snapshots

use super::{coins, display_value, get_json, Source};
use crate::scoring::relevance;
use crate::{Result, SearchResult};
use async_trait::async_trait;
use num_format::{Locale, ToFormattedString};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

const TRENDING_LIMIT: usize = 3;

pub fn coin_page_url(id: &str) -> String {
    format!("https://www.coingecko.com/en/coins/{id}")
}

#[derive(Debug, Deserialize)]
struct TrendingResponse {
    #[serde(default)]
    coins: Vec<TrendingEntry>,
}

#[derive(Debug, Deserialize)]
struct TrendingEntry {
    #[serde(default)]
    item: TrendingCoin,
}

#[derive(Debug, Default, Deserialize)]
struct TrendingCoin {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    symbol: String,
    market_cap_rank: Option<serde_json::Value>,
    #[serde(default)]
    data: Option<TrendingData>,
}

#[derive(Debug, Default, Deserialize)]
struct TrendingData {
    price: Option<serde_json::Value>,
    total_volume: Option<serde_json::Value>,
}

pub struct CoinGeckoTrending {
    client: Client,
    base_url: String,
}

impl CoinGeckoTrending {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn to_result(query: &str, coin: TrendingCoin) -> SearchResult {
        let rank = display_value(coin.market_cap_rank.as_ref());
        let data = coin.data.unwrap_or_default();
        let price = display_value(data.price.as_ref());
        let volume = display_value(data.total_volume.as_ref());

        SearchResult::new(
            format!("🔥 {} ({}) - Trending", coin.name, coin.symbol.to_uppercase()),
            format!(
                "{} is currently trending on CoinGecko. Market Cap Rank: #{}. Price: ${}",
                coin.name, rank, price
            ),
            coin_page_url(&coin.id),
            relevance(query, &coin.name),
            vec![
                format!("🔥 Trending: {}", coin.name),
                format!("Rank: #{rank}"),
                format!("24h Volume: ${volume}"),
            ],
        )
    }
}

#[async_trait]
impl Source for CoinGeckoTrending {
    fn name(&self) -> &str {
        "CoinGecko Trending"
    }

    async fn try_fetch(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = format!("{}/search/trending", self.base_url);
        let response: TrendingResponse = get_json(&self.client, &url, &[]).await?;

        Ok(response
            .coins
            .into_iter()
            .take(TRENDING_LIMIT)
            .map(|entry| Self::to_result(query, entry.item))
            .collect())
    }
}

#[derive(Debug, Default, Deserialize)]
struct PriceQuote {
    usd: Option<f64>,
    usd_24h_change: Option<f64>,
    usd_market_cap: Option<f64>,
}

pub struct CoinGeckoPrices {
    client: Client,
    base_url: String,
}

impl CoinGeckoPrices {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn to_result(query: &str, coin_id: &str, quote: &PriceQuote) -> SearchResult {
        let name = capitalize(coin_id);
        let price = format_amount(quote.usd.unwrap_or(0.0), 2);
        let change = quote.usd_24h_change.unwrap_or(0.0);
        let market_cap = format_amount(quote.usd_market_cap.unwrap_or(0.0), 0);
        let trend = if change > 0.0 { "📈" } else { "📉" };

        let title = format!("{trend} {name} Price Update");
        let score = relevance(query, &title);

        SearchResult::new(
            title,
            format!(
                "{name} is trading at ${price} with a 24h change of {change:.2}%. Market Cap: ${market_cap}"
            ),
            coin_page_url(coin_id),
            score,
            vec![
                format!("Price: ${price}"),
                format!("24h Change: {change:.2}%"),
                format!("Market Cap: ${market_cap}"),
            ],
        )
    }
}

#[async_trait]
impl Source for CoinGeckoPrices {
    fn name(&self) -> &str {
        "CoinGecko Prices"
    }

    async fn try_fetch(&self, query: &str) -> Result<Vec<SearchResult>> {
        let coin_ids = coins::coin_ids_for(query);
        let ids = coin_ids.join(",");
        let url = format!("{}/simple/price", self.base_url);

        let quotes: HashMap<String, PriceQuote> = get_json(
            &self.client,
            &url,
            &[
                ("ids", ids.as_str()),
                ("vs_currencies", "usd"),
                ("include_24hr_change", "true"),
                ("include_market_cap", "true"),
            ],
        )
        .await?;

        Ok(coin_ids
            .iter()
            .filter_map(|id| quotes.get(*id).map(|quote| Self::to_result(query, id, quote)))
            .collect())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Fixed-point amount with thousands separators, e.g. `67,432.10`
pub fn format_amount(value: f64, decimals: u32) -> String {
    let scale = 10u128.pow(decimals);
    let scaled = (value.abs() * scale as f64).round() as u128;
    let whole = scaled / scale;
    let fraction = scaled % scale;
    let sign = if value < 0.0 && scaled != 0 { "-" } else { "" };

    let mut out = format!("{sign}{}", whole.to_formatted_string(&Locale::en));
    if decimals > 0 {
        out.push_str(&format!(".{:0width$}", fraction, width = decimals as usize));
    }
    out
}
