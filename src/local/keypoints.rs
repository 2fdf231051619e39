//! Key-point extraction.
//!
//! Sentences are matched against weighted importance patterns and scored
//! with position and length bonuses. When too few sentences qualify, the
//! first sentence of each paragraph is considered as well. Candidates are
//! ranked with a fuzzy tie rule, near-duplicates are dropped, and the
//! survivors are rendered as a bulleted list.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::MIN_INPUT_CHARS;
use super::rules::RuleSet;
use crate::core::models::{KeyPoints, KeyPointsMetadata, LengthClass, ProviderKind};
use crate::errors::SummaryError;
use crate::text::{
    Sentence, first_sentence, normalize_whitespace, overlap_ratio, segment, significant_words,
};

pub const BULLET: &str = "• ";
pub const POINT_SEPARATOR: &str = "\n\n";

pub const MIN_SENTENCE_CHARS: usize = 25;
pub const MAX_SENTENCE_CHARS: usize = 200;
pub const SENTENCE_KEEP_SCORE: f64 = 5.0;

/// Paragraph leads are only considered below this many sentence candidates.
pub const PARAGRAPH_PASS_TRIGGER: usize = 4;
pub const MIN_PARAGRAPH_CHARS: usize = 50;
pub const MIN_LEAD_CHARS: usize = 30;
pub const MAX_LEAD_CHARS: usize = 150;
pub const PARAGRAPH_BASE_SCORE: f64 = 3.0;
pub const EARLY_PARAGRAPH_BONUS: f64 = 2.0;
pub const EARLY_PARAGRAPHS: usize = 3;
pub const PARAGRAPH_KEEP_SCORE: f64 = 4.0;

/// Scores this close together are treated as tied and resolved by document order.
pub const FUZZY_TIE_MARGIN: f64 = 1.0;
/// Share of the smaller significant-word set above which two points are duplicates.
pub const DUPLICATE_OVERLAP: f64 = 0.6;

pub const FALLBACK_POINTS: usize = 5;
pub const MIN_FALLBACK_CHARS: usize = 30;
pub const MAX_FALLBACK_CHARS: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    Strong,
    Medium,
    Weak,
}

#[derive(Debug)]
pub struct ImportancePattern {
    pub id: &'static str,
    pub strength: Strength,
    pub weight: f64,
    regex: Regex,
}

impl ImportancePattern {
    fn new(id: &'static str, strength: Strength, weight: f64, pattern: &str) -> Self {
        Self {
            id,
            strength,
            weight,
            regex: Regex::new(pattern).expect("importance pattern compiles"),
        }
    }

    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

pub static IMPORTANCE_PATTERNS: Lazy<Vec<ImportancePattern>> = Lazy::new(|| {
    vec![
        ImportancePattern::new(
            "key-marker",
            Strength::Strong,
            6.0,
            r"(?i)\b(key|main|important|primary|essential|critical|significant|major|central)\s+(points?|findings?|conclusions?|takeaways?|results?|insights?|factors?|ideas?|lessons?|themes?|benefits?|reasons?)\b",
        ),
        ImportancePattern::new(
            "research",
            Strength::Strong,
            6.0,
            r"(?i)\b(research|studies|study|analysis|surveys?|experiments?|evidence|data|scientists|researchers)\s+(shows?|showed|shown|found|finds|suggests?|suggested|indicates?|indicated|reveals?|revealed|demonstrates?|demonstrated|confirms?|confirmed)\b|\baccording to\b",
        ),
        ImportancePattern::new(
            "ordinal",
            Strength::Strong,
            5.0,
            r"(?i)\b(first(ly)?|second(ly)?|third(ly)?|finally|lastly|in conclusion|in summary|to summarize|to sum up|overall|most importantly)\b",
        ),
        ImportancePattern::new(
            "causal",
            Strength::Medium,
            4.0,
            r"(?i)\b(leads? to|led to|results? in|resulted in|caused by|because|therefore|consequently|as a result|due to|hence)\b",
        ),
        ImportancePattern::new(
            "prescriptive",
            Strength::Medium,
            4.0,
            r"(?i)\b(should|must|recommended|recommends?|advised|advisable|needs? to|it is essential|best practices?)\b",
        ),
        ImportancePattern::new(
            "statistic",
            Strength::Medium,
            4.0,
            r"(?i)\b(percent(age)?|statistics?|statistically|data shows?|on average|majority|median|increased?|decreased?|grew|declined?)\b",
        ),
        ImportancePattern::new("percentage", Strength::Weak, 4.0, r"\d+(\.\d+)?\s?%"),
        ImportancePattern::new("currency", Strength::Weak, 3.0, r"[$€£¥]\s?\d[\d,]*(\.\d+)?"),
        ImportancePattern::new(
            "quantity",
            Strength::Weak,
            3.0,
            r"(?i)\b\d[\d,]*(\.\d+)?\s+(million\s+|billion\s+|thousand\s+)?(people|users|customers|participants|students|patients|companies|employees|respondents|members|visitors|adults|children)\b",
        ),
    ]
});

static PROMOTIONAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(click here|subscribe|sign up|buy now|order now|shop now|discount|coupon|promo code|limited[- ]time|free trial|special offer|sponsored)\b",
    )
    .expect("promotional regex compiles")
});

static EXCLUDED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(\b(cookies?|privacy policy|terms of (service|use)|all rights reserved|copyright|skip to (main )?content|navigation|menu|log ?in|sign (in|up)|subscribe|newsletter|advertisement|sponsored|click here)\b|©)",
    )
    .expect("excluded-language regex compiles")
});

static PARAGRAPH_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("paragraph break regex compiles"));

/// Where a candidate came from. Sentence candidates order before paragraph
/// leads; within a kind, by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Provenance {
    Sentence { index: usize },
    ParagraphLead { paragraph: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyPoint {
    pub text: String,
    pub score: f64,
    /// Importance pattern ids that matched, for diagnostics.
    pub matched: Vec<&'static str>,
    pub source: Provenance,
}

/// What the sentence bonuses look at.
#[derive(Debug, Clone)]
struct PointFeatures {
    position: f64,
    char_len: usize,
    promotional: bool,
    distinct_patterns: usize,
}

static SENTENCE_BONUSES: Lazy<RuleSet<PointFeatures>> = Lazy::new(|| {
    RuleSet::new()
        .with("position:opening", 3.0, |f: &PointFeatures| f.position <= 0.15)
        .with("position:closing", 2.0, |f: &PointFeatures| f.position >= 0.85)
        .with("position:middle", 1.0, |f: &PointFeatures| {
            (0.4..=0.6).contains(&f.position)
        })
        .with("length:readable", 2.0, |f: &PointFeatures| {
            (40..=120).contains(&f.char_len)
        })
        .with("penalty:promotional", -4.0, |f: &PointFeatures| f.promotional)
        .with("multi-pattern", 2.0, |f: &PointFeatures| {
            f.distinct_patterns >= 2
        })
});

/// Maximum number of points for a length class.
#[must_use]
pub fn key_point_cap(length: LengthClass) -> usize {
    match length {
        LengthClass::Short => 5,
        LengthClass::Medium => 7,
        LengthClass::Long => 10,
    }
}

/// Ids of the importance patterns `text` matches, in pattern order.
#[must_use]
pub fn matched_patterns(text: &str) -> Vec<&'static str> {
    IMPORTANCE_PATTERNS
        .iter()
        .filter(|p| p.is_match(text))
        .map(|p| p.id)
        .collect()
}

fn pattern_weight(matched: &[&'static str]) -> f64 {
    IMPORTANCE_PATTERNS
        .iter()
        .filter(|p| matched.contains(&p.id))
        .map(|p| p.weight)
        .sum()
}

#[must_use]
pub fn is_promotional(text: &str) -> bool {
    PROMOTIONAL_RE.is_match(text)
}

/// Navigation, legal and advertising boilerplate.
#[must_use]
pub fn is_excluded(text: &str) -> bool {
    EXCLUDED_RE.is_match(text)
}

/// Score a sentence as a key-point candidate. Returns `None` when its length
/// is out of range.
#[must_use]
pub fn score_sentence(sentence: &Sentence, total: usize) -> Option<KeyPoint> {
    let text = sentence.text.trim();
    let char_len = text.chars().count();
    if !(MIN_SENTENCE_CHARS..=MAX_SENTENCE_CHARS).contains(&char_len) {
        return None;
    }

    let matched = matched_patterns(text);
    let features = PointFeatures {
        position: sentence.index as f64 / total.max(1) as f64,
        char_len,
        promotional: is_promotional(text),
        distinct_patterns: matched.len(),
    };
    let score = pattern_weight(&matched) + SENTENCE_BONUSES.score(&features);

    Some(KeyPoint {
        text: text.to_string(),
        score,
        matched,
        source: Provenance::Sentence {
            index: sentence.index,
        },
    })
}

/// Sentence candidates that clear the keep threshold.
#[must_use]
pub fn sentence_candidates(sentences: &[Sentence]) -> Vec<KeyPoint> {
    let total = sentences.len();
    sentences
        .iter()
        .filter_map(|s| score_sentence(s, total))
        .filter(|c| c.score >= SENTENCE_KEEP_SCORE)
        .collect()
}

/// First sentences of the blank-line separated paragraphs of `raw`.
#[must_use]
pub fn paragraph_candidates(raw: &str) -> Vec<KeyPoint> {
    PARAGRAPH_BREAK_RE
        .split(raw)
        .map(normalize_whitespace)
        .filter(|p| p.chars().count() >= MIN_PARAGRAPH_CHARS)
        .enumerate()
        .filter_map(|(paragraph, text)| {
            let lead = first_sentence(&text)?;
            if !(MIN_LEAD_CHARS..=MAX_LEAD_CHARS).contains(&lead.chars().count()) {
                return None;
            }
            let matched = matched_patterns(lead);
            let mut score = PARAGRAPH_BASE_SCORE + pattern_weight(&matched);
            if paragraph < EARLY_PARAGRAPHS {
                score += EARLY_PARAGRAPH_BONUS;
            }
            Some(KeyPoint {
                text: lead.to_string(),
                score,
                matched,
                source: Provenance::ParagraphLead { paragraph },
            })
        })
        .filter(|c| c.score >= PARAGRAPH_KEEP_SCORE)
        .collect()
}

/// `a` ranks ahead of `b`: near-equal scores defer to document order.
fn precedes(a: &KeyPoint, b: &KeyPoint) -> bool {
    if (a.score - b.score).abs() <= FUZZY_TIE_MARGIN {
        a.source < b.source
    } else {
        a.score > b.score
    }
}

/// Rank candidates best first.
///
/// The fuzzy tie rule is not transitive, so a comparison sort could panic or
/// depend on the algorithm. Instead each candidate, taken in document order,
/// is inserted ahead of the first ranked candidate it precedes.
#[must_use]
pub fn rank(mut candidates: Vec<KeyPoint>) -> Vec<KeyPoint> {
    candidates.sort_by_key(|c| c.source);

    let mut ranked: Vec<KeyPoint> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let at = ranked
            .iter()
            .position(|r| precedes(&candidate, r))
            .unwrap_or(ranked.len());
        ranked.insert(at, candidate);
    }
    ranked
}

/// Keep ranked candidates whose significant words are not mostly covered by
/// an already accepted point, up to `cap`.
#[must_use]
pub fn deduplicate(ranked: Vec<KeyPoint>, cap: usize) -> Vec<KeyPoint> {
    let mut used: Vec<HashSet<String>> = Vec::new();
    let mut accepted: Vec<KeyPoint> = Vec::new();

    for candidate in ranked {
        if accepted.len() >= cap {
            break;
        }
        let words = significant_words(&candidate.text);
        if used
            .iter()
            .any(|seen| overlap_ratio(seen, &words) > DUPLICATE_OVERLAP)
        {
            continue;
        }
        used.push(words);
        accepted.push(candidate);
    }

    accepted
}

/// Bullet one point, adding a period when it has no terminal punctuation.
#[must_use]
pub fn format_point(text: &str) -> String {
    let text = text.trim();
    if text.ends_with(['.', '!', '?']) {
        format!("{BULLET}{text}")
    } else {
        format!("{BULLET}{text}.")
    }
}

#[must_use]
pub fn format_points<'a, I>(points: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    points
        .into_iter()
        .map(format_point)
        .collect::<Vec<_>>()
        .join(POINT_SEPARATOR)
}

/// Plain sentences used when no candidate survives.
#[must_use]
pub fn fallback_sentences(sentences: &[Sentence]) -> Vec<&str> {
    sentences
        .iter()
        .map(|s| s.text.trim())
        .filter(|t| (MIN_FALLBACK_CHARS..=MAX_FALLBACK_CHARS).contains(&t.chars().count()))
        .filter(|t| !is_excluded(t))
        .take(FALLBACK_POINTS)
        .collect()
}

/// Ranked, deduplicated key points of `raw`, before formatting.
#[must_use]
pub fn select_key_points(raw: &str, sentences: &[Sentence], length: LengthClass) -> Vec<KeyPoint> {
    let mut candidates = sentence_candidates(sentences);
    if candidates.len() < PARAGRAPH_PASS_TRIGGER {
        candidates.extend(paragraph_candidates(raw));
    }
    deduplicate(rank(candidates), key_point_cap(length))
}

pub fn extract_key_points(text: &str, length: LengthClass) -> Result<KeyPoints, SummaryError> {
    if text.trim().chars().count() < MIN_INPUT_CHARS {
        return Err(SummaryError::InsufficientContent);
    }

    let sentences = segment(text)?;
    let points = select_key_points(text, &sentences, length);

    let (rendered, count) = if points.is_empty() {
        let fallback = fallback_sentences(&sentences);
        (format_points(fallback.iter().copied()), fallback.len())
    } else {
        (
            format_points(points.iter().map(|p| p.text.as_str())),
            points.len(),
        )
    };

    if count == 0 {
        return Err(SummaryError::NoKeyPoints);
    }

    Ok(KeyPoints {
        text: rendered,
        provider: ProviderKind::Local,
        metadata: KeyPointsMetadata {
            original_length: text.chars().count(),
            key_points_count: count,
        },
    })
}
