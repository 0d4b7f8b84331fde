//! String similarity primitives
//!
//! Lengths and edits are counted in characters (Unicode scalar values), so
//! accented names compare the same way they read.

/// Minimum number of single-character insertions, deletions, or
/// substitutions turning `a` into `b`
///
/// Case-sensitive; callers normalize first when they need otherwise.
///
/// # Examples
///
/// ```
/// use dossier_matcher::similarity::distance;
///
/// assert_eq!(distance("kitten", "sitting"), 3);
/// assert_eq!(distance("", "abc"), 3);
/// ```
pub fn distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Normalized similarity in `[0, 1]`
///
/// `(max_len - distance) / max_len`, with two empty strings defined as
/// identical.
///
/// # Examples
///
/// ```
/// use dossier_matcher::similarity::similarity;
///
/// assert_eq!(similarity("", ""), 1.0);
/// assert_eq!(similarity("abcd", "abcx"), 0.75);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    (max_len - distance(a, b)) as f64 / max_len as f64
}

/// Similarity of two person names, ignoring case and surrounding whitespace
pub fn name_similarity(a: &str, b: &str) -> f64 {
    similarity(&normalize_name(a), &normalize_name(b))
}

/// Lower-case and trim a name for comparison
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
