//! Sentence segmentation.
//!
//! A sentence is a run of non-terminator characters followed by one or more
//! of `.`, `!` or `?`. Text without any such run falls back to splitting on
//! periods, keeping only fragments long enough to read as sentences.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SummaryError;

static SENTENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("sentence regex compiles"));

/// Fallback fragments must be longer than this many characters.
pub const MIN_FALLBACK_FRAGMENT_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// 0-based position in scan order.
    pub index: usize,
    pub text: String,
}

impl Sentence {
    #[must_use]
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Collapse every run of Unicode whitespace to a single space and trim the ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split text into sentences in order of appearance.
///
/// Trailing text after the last terminator is not a sentence and is dropped.
pub fn segment(text: &str) -> Result<Vec<Sentence>, SummaryError> {
    let normalized = normalize_whitespace(text);

    let sentences: Vec<Sentence> = SENTENCE_RE
        .find_iter(&normalized)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(index, s)| Sentence::new(index, s))
        .collect();

    if !sentences.is_empty() {
        return Ok(sentences);
    }

    let fragments: Vec<Sentence> = normalized
        .split('.')
        .map(str::trim)
        .filter(|f| f.chars().count() > MIN_FALLBACK_FRAGMENT_CHARS)
        .enumerate()
        .map(|(index, f)| Sentence::new(index, format!("{f}.")))
        .collect();

    if fragments.is_empty() {
        Err(SummaryError::NoSentences)
    } else {
        Ok(fragments)
    }
}

/// The first terminated sentence of `text`, trimmed.
#[must_use]
pub fn first_sentence(text: &str) -> Option<&str> {
    SENTENCE_RE
        .find(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_terminator_runs_and_keeps_order() {
        let sentences = segment("First one here. Second?! Third one...   Fourth.").unwrap();
        let texts: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["First one here.", "Second?!", "Third one...", "Fourth."]
        );
        let indices: Vec<usize> = sentences.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_normalizes_whitespace_before_scanning() {
        let sentences = segment("  Line one\n\n continues   here.\tLine two.  ").unwrap();
        assert_eq!(sentences[0].text, "Line one continues here.");
        assert_eq!(sentences[1].text, "Line two.");
    }

    #[test]
    fn test_drops_unterminated_tail() {
        let sentences = segment("A full sentence. trailing words").unwrap();
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].text, "A full sentence.");
    }

    #[test]
    fn test_falls_back_when_there_is_no_terminator() {
        let sentences = segment("no punctuation anywhere in this text").unwrap();
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].text, "no punctuation anywhere in this text.");
    }

    #[test]
    fn test_fails_when_nothing_is_usable() {
        assert_eq!(segment("...."), Err(SummaryError::NoSentences));
        assert_eq!(segment("short"), Err(SummaryError::NoSentences));
        assert_eq!(segment("   "), Err(SummaryError::NoSentences));
    }

    #[test]
    fn test_no_sentence_is_empty() {
        let sentences = segment("Hello.. . World! ? Done.").unwrap();
        assert!(sentences.iter().all(|s| !s.text.trim().is_empty()));
    }

    #[test]
    fn test_first_sentence_of_paragraph() {
        assert_eq!(
            first_sentence("Lead sentence here. Then more."),
            Some("Lead sentence here.")
        );
        assert_eq!(first_sentence("no terminator"), None);
    }
}
