//! NewsAPI.org crypto headlines

use super::{get_json, Source};
use crate::scoring::relevance;
use crate::{Result, SearchResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const NEWS_QUERY: &str = "cryptocurrency OR bitcoin OR ethereum";
const PAGE_SIZE: &str = "5";
const ARTICLE_LIMIT: usize = 3;
const CONTENT_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
    source: Option<ArticleSource>,
}

#[derive(Debug, Default, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

pub struct NewsApi {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NewsApi {
    pub fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    fn to_result(query: &str, article: Article) -> SearchResult {
        let title = article.title.unwrap_or_default();
        let body = match article.description.filter(|d| !d.is_empty()) {
            Some(description) => description,
            None => article
                .content
                .unwrap_or_default()
                .chars()
                .take(CONTENT_PREVIEW_CHARS)
                .collect(),
        };
        let source_name = article
            .source
            .and_then(|s| s.name)
            .unwrap_or_else(|| "Unknown".to_string());
        let score = relevance(query, &title);

        SearchResult::new(
            title.clone(),
            body,
            article.url.unwrap_or_default(),
            score,
            vec![
                title,
                format!("Source: {source_name}"),
                format!("Published: {}", article.published_at.unwrap_or_default()),
            ],
        )
    }
}

#[async_trait]
impl Source for NewsApi {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn try_fetch(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = format!("{}/everything", self.base_url);

        let response: EverythingResponse = get_json(
            &self.client,
            &url,
            &[
                ("q", NEWS_QUERY),
                ("apiKey", self.api_key.as_str()),
                ("sortBy", "publishedAt"),
                ("pageSize", PAGE_SIZE),
            ],
        )
        .await?;

        Ok(response
            .articles
            .into_iter()
            .take(ARTICLE_LIMIT)
            .map(|article| Self::to_result(query, article))
            .collect())
    }
}
