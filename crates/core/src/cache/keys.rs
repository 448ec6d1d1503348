use crate::storage::PageRequest;

/// Prefix shared by every trending-destinations cache key.
pub const TRENDING_PREFIX: &str = "destinations:trending";

/// Returns the cache key for one page of trending destinations.
pub fn trending_destinations_key(page: PageRequest) -> String {
    format!("{}:{}:{}", TRENDING_PREFIX, page.page(), page.limit())
}

/// Returns the pattern matching every cached trending page.
pub fn trending_destinations_pattern() -> String {
    format!("{}:*", TRENDING_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::pattern_matches;

    #[test]
    fn test_trending_key_format() {
        let page = PageRequest::new(2, 25).unwrap();
        assert_eq!(trending_destinations_key(page), "destinations:trending:2:25");
    }

    #[test]
    fn test_distinct_pages_get_distinct_keys() {
        let first = trending_destinations_key(PageRequest::new(1, 10).unwrap());
        let second = trending_destinations_key(PageRequest::new(2, 10).unwrap());
        assert_ne!(first, second);
    }

    #[test]
    fn test_pattern_matches_every_trending_key() {
        let pattern = trending_destinations_pattern();
        for (page, limit) in [(1, 10), (3, 5), (100, 1)] {
            let key = trending_destinations_key(PageRequest::new(page, limit).unwrap());
            assert!(pattern_matches(&pattern, &key), "{key} should match");
        }
        assert!(!pattern_matches(&pattern, "destinations:list:1:10"));
    }
}
