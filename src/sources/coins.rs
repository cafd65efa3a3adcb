//! Fixed keyword tables mapping query words to coins

/// Query keyword to CoinGecko coin id, in match order
pub const COIN_IDS: &[(&str, &str)] = &[
    ("bitcoin", "bitcoin"),
    ("btc", "bitcoin"),
    ("ethereum", "ethereum"),
    ("eth", "ethereum"),
    ("solana", "solana"),
    ("sol", "solana"),
    ("cardano", "cardano"),
    ("ada", "cardano"),
    ("xrp", "ripple"),
    ("ripple", "ripple"),
];

/// Query keyword to CryptoPanic currency code, in match order
pub const CURRENCY_CODES: &[(&str, &str)] = &[
    ("bitcoin", "BTC"),
    ("btc", "BTC"),
    ("ethereum", "ETH"),
    ("eth", "ETH"),
    ("solana", "SOL"),
    ("sol", "SOL"),
];

pub const DEFAULT_COIN_IDS: &[&str] = &["bitcoin", "ethereum", "solana"];

/// Every coin id whose keyword occurs in the query, deduplicated, or the defaults
pub fn coin_ids_for(query: &str) -> Vec<&'static str> {
    let query_lower = query.to_lowercase();
    let mut ids: Vec<&'static str> = Vec::new();

    for (keyword, id) in COIN_IDS {
        if query_lower.contains(keyword) && !ids.contains(id) {
            ids.push(*id);
        }
    }

    if ids.is_empty() {
        ids.extend_from_slice(DEFAULT_COIN_IDS);
    }

    ids
}

/// Currency code for the first keyword found in the query
pub fn currency_for(query: &str) -> Option<&'static str> {
    let query_lower = query.to_lowercase();

    CURRENCY_CODES
        .iter()
        .find(|(keyword, _)| query_lower.contains(keyword))
        .map(|(_, code)| *code)
}
