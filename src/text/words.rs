use std::collections::HashSet;

/// Words must be longer than this many characters to count as significant.
pub const SIGNIFICANT_WORD_MIN_CHARS: usize = 3;

/// Case-folded alphanumeric tokens longer than three characters.
#[must_use]
pub fn significant_words(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > SIGNIFICANT_WORD_MIN_CHARS)
        .map(str::to_lowercase)
        .collect()
}

/// Shared words as a fraction of the smaller set. Empty sets never overlap.
#[must_use]
pub fn overlap_ratio(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let smaller = a.len().min(b.len());
    if smaller == 0 {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    shared as f64 / smaller as f64
}
