//! CryptoPanic news aggregator

use super::{coins, get_json, Source};
use crate::scoring::relevance;
use crate::{Result, SearchResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const POST_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
struct PostsResponse {
    #[serde(default)]
    results: Vec<Post>,
}

#[derive(Debug, Default, Deserialize)]
struct Post {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    published_at: String,
    source: Option<PostSource>,
    votes: Option<PostVotes>,
}

#[derive(Debug, Default, Deserialize)]
struct PostSource {
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PostVotes {
    #[serde(default)]
    positive: i64,
}

pub struct CryptoPanic {
    client: Client,
    base_url: String,
    api_key: String,
}

impl CryptoPanic {
    pub fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    fn to_result(query: &str, post: Post) -> SearchResult {
        let source_title = post.source.and_then(|s| s.title);
        let votes = post.votes.map(|v| v.positive).unwrap_or(0);

        SearchResult::new(
            post.title.clone(),
            format!(
                "{}. {} - Published: {}",
                post.title,
                source_title.as_deref().unwrap_or(""),
                post.published_at
            ),
            post.url,
            relevance(query, &post.title),
            vec![
                post.title.clone(),
                format!("Source: {}", source_title.as_deref().unwrap_or("Unknown")),
                format!("Votes: {votes}"),
            ],
        )
    }
}

#[async_trait]
impl Source for CryptoPanic {
    fn name(&self) -> &str {
        "CryptoPanic"
    }

    async fn try_fetch(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = format!("{}/posts/", self.base_url);
        let mut params = vec![("auth_token", self.api_key.as_str()), ("public", "true")];

        let currency = coins::currency_for(query);
        if let Some(code) = currency {
            params.push(("currencies", code));
        }

        tracing::info!(
            "[SOURCE] Fetching from CryptoPanic (currency filter: {})",
            currency.unwrap_or("none")
        );

        let response: PostsResponse = get_json(&self.client, &url, &params).await?;

        Ok(response
            .results
            .into_iter()
            .take(POST_LIMIT)
            .map(|post| Self::to_result(query, post))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::fixture::{self, FixtureServer};
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    fn posts_router() -> Router {
        Router::new().route(
            "/posts/",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                if params.get("auth_token").map(String::as_str) != Some("secret") {
                    return Err(StatusCode::UNAUTHORIZED);
                }
                let currency = params.get("currencies").cloned().unwrap_or_default();
                let posts: Vec<_> = (0..7)
                    .map(|i| {
                        json!({
                            "title": format!("{currency} story {i}"),
                            "url": format!("https://news.example/{i}"),
                            "published_at": "2024-03-01T10:00:00Z",
                            "source": {"title": "CoinDesk"},
                            "votes": {"positive": i}
                        })
                    })
                    .collect();
                Ok(Json(json!({ "results": posts })))
            }),
        )
    }

    #[tokio::test]
    async fn test_posts_are_capped_and_filtered_by_currency() {
        let server = FixtureServer::start(posts_router()).await;
        let source = CryptoPanic::new(fixture::client(), server.base_url(), "secret".to_string());

        let results = source.try_fetch("latest eth news").await.unwrap();

        assert_eq!(results.len(), 5);
        assert_eq!(results[0].title, "ETH story 0");
        assert_eq!(
            results[0].body,
            "ETH story 0. CoinDesk - Published: 2024-03-01T10:00:00Z"
        );
        assert_eq!(results[4].highlight.body, vec!["ETH story 4", "Source: CoinDesk", "Votes: 4"]);
    }

    #[tokio::test]
    async fn test_missing_source_and_votes_use_placeholders() {
        let router = Router::new().route(
            "/posts/",
            get(|| async { Json(json!({"results": [{"title": "Untitled", "url": "u"}]})) }),
        );
        let server = FixtureServer::start(router).await;
        let source = CryptoPanic::new(fixture::client(), server.base_url(), "key".to_string());

        let results = source.try_fetch("").await.unwrap();

        assert_eq!(results[0].body, "Untitled.  - Published: ");
        assert_eq!(results[0].highlight.body[1], "Source: Unknown");
        assert_eq!(results[0].highlight.body[2], "Votes: 0");
        assert_eq!(results[0].score(), 0.5);
    }

    #[tokio::test]
    async fn test_rejected_key_is_failed_outcome() {
        let server = FixtureServer::start(posts_router()).await;
        let source = CryptoPanic::new(fixture::client(), server.base_url(), "wrong".to_string());

        let outcome = source.fetch("bitcoin").await;
        match outcome {
            crate::sources::FetchOutcome::Failed { source, error } => {
                assert_eq!(source, "CryptoPanic");
                assert!(matches!(error, crate::Error::Upstream { status, .. } if status == StatusCode::UNAUTHORIZED));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
