use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single ranked hit returned by `/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "result_metadata", alias = "metadata")]
    pub metadata: ResultMetadata,
    pub title: String,
    pub body: String,
    pub url: String,
    pub highlight: Highlight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    pub score: f64,
}

/// Short snippets shown under a result
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Highlight {
    pub body: Vec<String>,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        url: impl Into<String>,
        score: f64,
        highlights: Vec<String>,
    ) -> Self {
        Self {
            metadata: ResultMetadata { score },
            title: title.into(),
            body: body.into(),
            url: url.into(),
            highlight: Highlight { body: highlights },
        }
    }

    pub fn score(&self) -> f64 {
        self.metadata.score
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub filter: Option<serde_json::Value>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl SearchRequest {
    /// Filter as text; any JSON type is accepted, blanks and nulls count as absent
    pub fn filter_text(&self) -> Option<String> {
        let text = match self.filter.as_ref()? {
            serde_json::Value::Null => return None,
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        Some(text).filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    pub search_results: Vec<SearchResult>,
}

impl SearchResponse {
    pub fn ok(search_results: Vec<SearchResult>) -> Self {
        Self {
            error: None,
            search_results,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            search_results: Vec::new(),
        }
    }
}

/// Payload of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub status: String,
    pub data_sources: BTreeMap<String, String>,
    pub endpoints: BTreeMap<String, String>,
}
