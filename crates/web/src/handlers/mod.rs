//! HTTP handlers

pub mod health;
pub mod polls;
pub mod search;

/// Decoded urlencoded pairs from a query string or form body, repeated names kept
pub type QueryPairs = Vec<(String, String)>;

/// Value of `name`; when it repeats, the last occurrence wins
pub fn last_param(pairs: &[(String, String)], name: &str) -> Option<String> {
    pairs
        .iter()
        .rev()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> QueryPairs {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_last_param_wins() {
        let query = pairs(&[("page", "1"), ("other", "x"), ("page", "2")]);
        assert_eq!(last_param(&query, "page").as_deref(), Some("2"));
        assert_eq!(last_param(&query, "other").as_deref(), Some("x"));
        assert_eq!(last_param(&query, "missing"), None);
    }

    #[test]
    fn test_last_param_keeps_empty_value() {
        let query = pairs(&[("search_text", "")]);
        assert_eq!(last_param(&query, "search_text").as_deref(), Some(""));
    }
}
