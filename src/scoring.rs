//! Keyword relevance heuristic shared by all sources

pub const NEUTRAL_SCORE: f64 = 0.5;
pub const EXACT_MATCH_SCORE: f64 = 0.95;
const KEYWORD_WEIGHT: f64 = 0.4;
const MIN_KEYWORD_LEN: usize = 3;

/// Score how well `text` matches `query`, in `[0, 1]`.
///
/// A case-insensitive substring hit scores [`EXACT_MATCH_SCORE`]. Otherwise the
/// score grows from [`NEUTRAL_SCORE`] with the share of query words longer than
/// three characters that occur in the text.
pub fn relevance(query: &str, text: &str) -> f64 {
    if query.is_empty() || text.is_empty() {
        return NEUTRAL_SCORE;
    }

    let query_lower = query.to_lowercase();
    let text_lower = text.to_lowercase();

    if text_lower.contains(&query_lower) {
        return EXACT_MATCH_SCORE;
    }

    let keywords: Vec<&str> = query_lower
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_KEYWORD_LEN)
        .collect();

    if keywords.is_empty() {
        return NEUTRAL_SCORE;
    }

    let matches = keywords
        .iter()
        .filter(|word| text_lower.contains(*word))
        .count();

    NEUTRAL_SCORE + (matches as f64 / keywords.len() as f64) * KEYWORD_WEIGHT
}
