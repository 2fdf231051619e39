//! Extractive summarization.
//!
//! Every sentence is scored on its own by a [`RuleSet`]. The best ones are
//! kept, put back into reading order and joined into prose.

use once_cell::sync::Lazy;
use regex::Regex;

use super::rules::RuleSet;
use super::MIN_INPUT_CHARS;
use crate::core::models::{LengthClass, ProviderKind, Summary, SummaryMetadata};
use crate::errors::SummaryError;
use crate::text::{Sentence, segment};

/// Summaries shorter than this fall back to the document's opening sentences.
pub const MIN_SUMMARY_CHARS: usize = 50;

/// Number of leading sentences used by the length-floor fallback.
pub const FALLBACK_SENTENCES: usize = 3;

pub const SHORT_SENTENCE_PENALTY: f64 = -2.0;
pub const QUESTION_PENALTY: f64 = -1.0;
pub const EXCLAMATION_PENALTY: f64 = -0.5;

/// Transition and importance vocabulary, matched as case-insensitive substrings.
pub const IMPORTANT_TERMS: &[&str] = &[
    "important",
    "significant",
    "key",
    "main",
    "primary",
    "essential",
    "crucial",
    "conclusion",
    "result",
    "finding",
    "discovered",
    "revealed",
    "shows",
    "indicates",
    "however",
    "therefore",
    "because",
    "since",
    "thus",
    "consequently",
    "moreover",
    "first",
    "second",
    "third",
    "finally",
    "lastly",
    "additionally",
    "furthermore",
    "research",
    "study",
    "analysis",
    "data",
    "evidence",
    "proof",
    "demonstrates",
];

static PERCENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(\.\d+)?%").expect("percent regex compiles"));
static CURRENCY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[$€£¥]\s?\d").expect("currency regex compiles"));
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{4}\b").expect("year regex compiles"));

/// Optional penalties. Enabled by default; [`ScoringPolicy::lenient`] turns them off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringPolicy {
    pub penalize_short: bool,
    pub penalize_questions: bool,
    pub penalize_exclamations: bool,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            penalize_short: true,
            penalize_questions: true,
            penalize_exclamations: true,
        }
    }
}

impl ScoringPolicy {
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            penalize_short: false,
            penalize_questions: false,
            penalize_exclamations: false,
        }
    }
}

/// What the summary rules look at for one sentence.
#[derive(Debug, Clone)]
pub struct SentenceFeatures {
    pub lower: String,
    pub word_count: usize,
    /// `index / total`, in `[0, 1)`.
    pub position: f64,
}

impl SentenceFeatures {
    #[must_use]
    pub fn of(sentence: &Sentence, total: usize) -> Self {
        Self {
            lower: sentence.text.to_lowercase(),
            word_count: sentence.word_count(),
            position: sentence.index as f64 / total.max(1) as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub sentence: Sentence,
    pub score: f64,
}

#[derive(Debug)]
pub struct SentenceScorer {
    rules: RuleSet<SentenceFeatures>,
}

impl Default for SentenceScorer {
    fn default() -> Self {
        Self::new(ScoringPolicy::default())
    }
}

impl SentenceScorer {
    #[must_use]
    pub fn new(policy: ScoringPolicy) -> Self {
        let mut rules = RuleSet::new()
            .with("length:ideal", 3.0, |f: &SentenceFeatures| {
                (8..=30).contains(&f.word_count)
            })
            .with("length:acceptable", 1.0, |f: &SentenceFeatures| {
                (5..=40).contains(&f.word_count) && !(8..=30).contains(&f.word_count)
            })
            .with("position:opening", 3.0, |f: &SentenceFeatures| {
                f.position <= 0.1
            })
            .with("position:closing", 2.0, |f: &SentenceFeatures| {
                f.position >= 0.9
            })
            .with("position:middle", 1.0, |f: &SentenceFeatures| {
                (0.4..=0.6).contains(&f.position)
            })
            .with("numeric:percentage", 2.0, |f: &SentenceFeatures| {
                PERCENT_RE.is_match(&f.lower)
            })
            .with("numeric:currency", 1.0, |f: &SentenceFeatures| {
                CURRENCY_RE.is_match(&f.lower)
            })
            .with("numeric:year", 1.0, |f: &SentenceFeatures| {
                YEAR_RE.is_match(&f.lower)
            });

        for &term in IMPORTANT_TERMS {
            rules = rules.with(term, 2.0, move |f: &SentenceFeatures| f.lower.contains(term));
        }

        if policy.penalize_short {
            rules = rules.with(
                "penalty:short",
                SHORT_SENTENCE_PENALTY,
                |f: &SentenceFeatures| f.word_count < 5,
            );
        }
        if policy.penalize_questions {
            rules = rules.with("penalty:question", QUESTION_PENALTY, |f: &SentenceFeatures| {
                f.lower.contains('?')
            });
        }
        if policy.penalize_exclamations {
            rules = rules.with(
                "penalty:exclamation",
                EXCLAMATION_PENALTY,
                |f: &SentenceFeatures| f.lower.contains('!') && !f.lower.contains("important"),
            );
        }

        Self { rules }
    }

    #[must_use]
    pub fn score(&self, sentence: &Sentence, total: usize) -> f64 {
        self.rules.score(&SentenceFeatures::of(sentence, total))
    }

    /// Names of the rules that fired, for diagnostics.
    #[must_use]
    pub fn explain(&self, sentence: &Sentence, total: usize) -> Vec<&'static str> {
        self.rules.matching(&SentenceFeatures::of(sentence, total))
    }

    /// All sentences, best first. Equal scores keep document order.
    #[must_use]
    pub fn rank(&self, sentences: &[Sentence]) -> Vec<ScoredCandidate> {
        let total = sentences.len();
        let mut scored: Vec<ScoredCandidate> = sentences
            .iter()
            .map(|sentence| ScoredCandidate {
                score: self.score(sentence, total),
                sentence: sentence.clone(),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.sentence.index.cmp(&b.sentence.index))
        });
        scored
    }
}

/// How many sentences a summary of `total` sentences should keep.
#[must_use]
pub fn target_sentence_count(total: usize, length: LengthClass) -> usize {
    let (percent, min, max) = match length {
        LengthClass::Short => (15, 1, 3),
        LengthClass::Medium => (25, 2, 8),
        LengthClass::Long => (40, 3, 12),
    };
    (total * percent).div_ceil(100).clamp(min, max).min(total)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub text: String,
    pub sentences_used: usize,
}

/// Pick the best sentences and join them in reading order.
#[must_use]
pub fn select(sentences: &[Sentence], length: LengthClass, scorer: &SentenceScorer) -> Selection {
    let target = target_sentence_count(sentences.len(), length);

    let mut chosen: Vec<Sentence> = scorer
        .rank(sentences)
        .into_iter()
        .take(target)
        .map(|c| c.sentence)
        .collect();
    chosen.sort_by_key(|s| s.index);

    let text = chosen
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    if text.chars().count() >= MIN_SUMMARY_CHARS || sentences.is_empty() {
        return Selection {
            text,
            sentences_used: chosen.len(),
        };
    }

    leading_sentences(sentences)
}

/// The first few sentences, extended until the summary reaches the length floor.
fn leading_sentences(sentences: &[Sentence]) -> Selection {
    let mut text = String::new();
    let mut used = 0;

    for sentence in sentences {
        if used >= FALLBACK_SENTENCES && text.chars().count() >= MIN_SUMMARY_CHARS {
            break;
        }
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&sentence.text);
        used += 1;
    }

    Selection {
        text,
        sentences_used: used,
    }
}

pub fn summarize(text: &str, length: LengthClass) -> Result<Summary, SummaryError> {
    summarize_with(text, length, &SentenceScorer::default())
}

pub fn summarize_with(
    text: &str,
    length: LengthClass,
    scorer: &SentenceScorer,
) -> Result<Summary, SummaryError> {
    if text.trim().chars().count() < MIN_INPUT_CHARS {
        return Err(SummaryError::InsufficientContent);
    }

    let sentences = segment(text)?;
    let selection = select(&sentences, length, scorer);

    Ok(Summary {
        metadata: SummaryMetadata {
            original_length: text.chars().count(),
            summary_length: selection.text.chars().count(),
            sentences_used: Some(selection.sentences_used),
            total_sentences: Some(sentences.len()),
        },
        text: selection.text,
        provider: ProviderKind::Local,
    })
}
