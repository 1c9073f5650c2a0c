//! Case folding shared by every case-insensitive comparison in the crate.

/// Folds `s` for comparison. Unicode lowercase mapping, independent of locale.
pub fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

/// `a` and `b` are equal once folded.
pub fn eq_folded(a: &str, b: &str) -> bool {
    fold_case(a) == fold_case(b)
}

/// `haystack` contains the already folded `needle`.
pub fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    fold_case(haystack).contains(folded_needle)
}
