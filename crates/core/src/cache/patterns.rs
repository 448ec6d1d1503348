//! Glob matching for cache invalidation patterns.

/// Checks if a cache key matches a glob pattern.
///
/// `*` matches any run of characters, including the empty run. Every other
/// character matches itself. This is the subset of Redis `MATCH` syntax the
/// cache keys use, so the memory and Redis backends agree on what a pattern
/// deletes.
///
/// # Examples
///
/// ```
/// use wayfare_core::cache::pattern_matches;
///
/// assert!(pattern_matches("destinations:trending:*", "destinations:trending:1:10"));
/// assert!(pattern_matches("*:trending:*", "destinations:trending:2:5"));
/// assert!(!pattern_matches("destinations:trending:*", "stories:1"));
/// ```
pub fn pattern_matches(pattern: &str, key: &str) -> bool {
    let pattern = pattern.as_bytes();
    let key = key.as_bytes();

    let (mut p, mut k) = (0, 0);
    // Position of the last `*` seen and the key position it was tried at.
    let mut backtrack: Option<(usize, usize)> = None;

    while k < key.len() {
        if p < pattern.len() && pattern[p] == b'*' {
            backtrack = Some((p, k));
            p += 1;
        } else if p < pattern.len() && pattern[p] == key[k] {
            p += 1;
            k += 1;
        } else if let Some((star, tried)) = backtrack {
            // Let the last `*` swallow one more character and retry.
            p = star + 1;
            k = tried + 1;
            backtrack = Some((star, tried + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&c| c == b'*')
}
