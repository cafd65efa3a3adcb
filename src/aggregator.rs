//! Fan a query out to every source and merge the hits into one ranked list

use crate::sources::Source;
use crate::{Result, SearchResult};
use futures::future::join_all;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::info;

/// Upper bound on results returned for one query
pub const RESULT_CAP: usize = 10;

#[derive(Clone)]
pub struct Aggregator {
    sources: Vec<Arc<dyn Source>>,
    max_results: usize,
}

impl Aggregator {
    /// `max_results` is clamped to `1..=RESULT_CAP`
    pub fn new(sources: Vec<Arc<dyn Source>>, max_results: usize) -> Self {
        Self {
            sources,
            max_results: max_results.clamp(1, RESULT_CAP),
        }
    }

    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    /// Query all sources concurrently and return the top hits by score.
    ///
    /// A source that fails contributes nothing. The only error is a source task
    /// that panicked.
    pub async fn search(&self, query: &str, filter: Option<&str>) -> Result<Vec<SearchResult>> {
        info!(
            "[AGGREGATE] Query: \"{}\" (filter: {}) across {} sources",
            query,
            filter.unwrap_or("none"),
            self.sources.len()
        );

        let tasks = self.sources.iter().map(|source| {
            let source = Arc::clone(source);
            let query = query.to_string();
            tokio::spawn(async move { source.fetch(&query).await })
        });

        let mut per_source = Vec::with_capacity(self.sources.len());
        for outcome in join_all(tasks).await {
            per_source.push(outcome?.into_results());
        }

        let results = merge_ranked(per_source, self.max_results);
        info!("[AGGREGATE] Returning {} results", results.len());

        Ok(results)
    }
}

/// Concatenate per-source hits in source order, sort by descending score and cap
/// at `limit`, never more than [`RESULT_CAP`].
///
/// The sort is stable so equal scores keep source order.
pub fn merge_ranked(per_source: Vec<Vec<SearchResult>>, limit: usize) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = per_source.into_iter().flatten().collect();
    results.sort_by(|a, b| b.score().partial_cmp(&a.score()).unwrap_or(Ordering::Equal));
    results.truncate(limit.min(RESULT_CAP));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use async_trait::async_trait;

    struct FixedSource {
        name: String,
        results: Vec<SearchResult>,
    }

    #[async_trait]
    impl Source for FixedSource {
        fn name(&self) -> &str {
            &self.name
        }

        async fn try_fetch(&self, _query: &str) -> Result<Vec<SearchResult>> {
            Ok(self.results.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl Source for FailingSource {
        fn name(&self) -> &str {
            "Failing"
        }

        async fn try_fetch(&self, _query: &str) -> Result<Vec<SearchResult>> {
            Err(Error::Unknown("connection reset".to_string()))
        }
    }

    struct PanickingSource;

    #[async_trait]
    impl Source for PanickingSource {
        fn name(&self) -> &str {
            "Panicking"
        }

        async fn try_fetch(&self, _query: &str) -> Result<Vec<SearchResult>> {
            panic!("source bug")
        }
    }

    fn hit(title: &str, score: f64) -> SearchResult {
        SearchResult::new(title, "", "", score, vec![])
    }

    fn fixed(name: &str, scores: &[f64]) -> Arc<dyn Source> {
        Arc::new(FixedSource {
            name: name.to_string(),
            results: scores
                .iter()
                .enumerate()
                .map(|(i, score)| hit(&format!("{name}-{i}"), *score))
                .collect(),
        })
    }

    #[test]
    fn test_merge_sorts_descending_and_caps() {
        let merged = merge_ranked(
            vec![
                vec![hit("a", 0.5), hit("b", 0.95)],
                vec![hit("c", 0.7)],
                vec![],
            ],
            2,
        );

        let titles: Vec<_> = merged.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "c"]);
    }

    #[test]
    fn test_merge_caps_oversized_limit() {
        let per_source: Vec<Vec<SearchResult>> = (0..4)
            .map(|s| (0..5).map(|i| hit(&format!("{s}-{i}"), 0.5 + i as f64 * 0.1)).collect())
            .collect();

        assert_eq!(merge_ranked(per_source, 50).len(), RESULT_CAP);
    }

    #[test]
    fn test_merge_keeps_source_order_on_ties() {
        let merged = merge_ranked(
            vec![vec![hit("first", 0.5)], vec![hit("second", 0.5), hit("top", 0.9)]],
            10,
        );

        let titles: Vec<_> = merged.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["top", "first", "second"]);
    }

    #[tokio::test]
    async fn test_four_full_sources_yield_top_ten() {
        let aggregator = Aggregator::new(
            vec![
                fixed("s1", &[0.50, 0.55, 0.60, 0.65, 0.70]),
                fixed("s2", &[0.51, 0.56, 0.61, 0.66, 0.71]),
                fixed("s3", &[0.90, 0.91, 0.92, 0.93, 0.94]),
                fixed("s4", &[0.95, 0.52, 0.53, 0.54, 0.57]),
            ],
            10,
        );

        let results = aggregator.search("bitcoin", None).await.unwrap();

        assert_eq!(results.len(), 10);
        assert!(results.windows(2).all(|w| w[0].score() >= w[1].score()));

        let mut all: Vec<f64> = vec![
            0.50, 0.55, 0.60, 0.65, 0.70, 0.51, 0.56, 0.61, 0.66, 0.71, 0.90, 0.91, 0.92, 0.93,
            0.94, 0.95, 0.52, 0.53, 0.54, 0.57,
        ];
        all.sort_by(|a, b| b.partial_cmp(a).unwrap());
        let scores: Vec<f64> = results.iter().map(|r| r.score()).collect();
        assert_eq!(scores, all[..10].to_vec());
    }

    #[tokio::test]
    async fn test_failing_source_does_not_hide_others() {
        let aggregator = Aggregator::new(
            vec![
                Arc::new(FailingSource) as Arc<dyn Source>,
                fixed("ok", &[0.6, 0.8]),
            ],
            10,
        );

        let results = aggregator.search("eth", Some("news")).await.unwrap();

        let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["ok-1", "ok-0"]);
    }

    #[tokio::test]
    async fn test_limit_never_exceeds_cap() {
        let sources = || {
            vec![
                fixed("s1", &[0.5, 0.6, 0.7, 0.8, 0.9]),
                fixed("s2", &[0.5, 0.6, 0.7, 0.8, 0.9]),
                fixed("s3", &[0.5, 0.6, 0.7, 0.8, 0.9]),
                fixed("s4", &[0.5, 0.6, 0.7, 0.8, 0.9]),
            ]
        };

        let results = Aggregator::new(sources(), 50).search("btc", None).await.unwrap();
        assert_eq!(results.len(), RESULT_CAP);

        let results = Aggregator::new(sources(), 0).search("btc", None).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score(), 0.9);
    }

    #[tokio::test]
    async fn test_no_sources_yield_empty_list() {
        let aggregator = Aggregator::new(vec![], 10);
        assert!(aggregator.search("", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_panicking_source_is_top_level_error() {
        let aggregator = Aggregator::new(
            vec![fixed("ok", &[0.6]), Arc::new(PanickingSource) as Arc<dyn Source>],
            10,
        );

        let err = aggregator.search("bitcoin", None).await.unwrap_err();
        assert!(matches!(err, Error::Join(_)));
    }
}
