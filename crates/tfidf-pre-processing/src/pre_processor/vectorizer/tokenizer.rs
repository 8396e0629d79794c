use ahash::HashSet;

/// Split a document into whitespace-delimited tokens.
///
/// Runs of whitespace collapse, so no empty tokens are produced. Matching
/// against the vocabulary is exact and case-sensitive.
#[inline]
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Distinct tokens of a single document.
pub fn token_set(text: &str) -> HashSet<&str> {
    tokenize(text).collect()
}
