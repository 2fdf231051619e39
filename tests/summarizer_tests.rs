use pagesum::core::models::{LengthClass, ProviderKind};
use pagesum::errors::SummaryError;
use pagesum::local::summarizer::{ScoringPolicy, SentenceScorer, select, target_sentence_count};
use pagesum::local::summarize;
use pagesum::text::{Sentence, segment};

const ARTICLE: &str = "City officials announced a new plan for the riverside park on Monday. \
    The park has been closed since the flood damaged its walkways last spring. \
    Research shows that 42% of residents visited the park at least once a month before the closure. \
    Workers will rebuild the paths with permeable stone. \
    The budget for the project is $4 million, most of it from a state grant. \
    Is the timeline realistic? \
    Some neighbors remain doubtful. \
    However, the contractor finished a similar project in 2019 ahead of schedule. \
    The main entrance will reopen first, followed by the playground. \
    In the end, officials expect the whole park to reopen next summer.";

fn plain_document(sentences: usize) -> String {
    (0..sentences)
        .map(|i| format!("Sentence number {i} describes a plain observation about the garden."))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_summaries_are_deterministic() {
    let first = summarize(ARTICLE, LengthClass::Medium).unwrap();
    let second = summarize(ARTICLE, LengthClass::Medium).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.provider, ProviderKind::Local);
}

#[test]
fn test_summary_sentences_keep_reading_order() {
    let summary = summarize(ARTICLE, LengthClass::Long).unwrap();
    let positions: Vec<usize> = segment(&summary.text)
        .unwrap()
        .iter()
        .map(|s| ARTICLE.find(s.text.as_str()).expect("summary sentence comes from the input"))
        .collect();

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn test_short_input_is_rejected() {
    assert_eq!(
        summarize("Hi there.", LengthClass::Medium),
        Err(SummaryError::InsufficientContent)
    );
    assert_eq!(
        summarize("   \n\t  ", LengthClass::Short),
        Err(SummaryError::InsufficientContent)
    );
}

#[test]
fn test_target_counts_for_twenty_sentences() {
    let text = plain_document(20);

    let short = summarize(&text, LengthClass::Short).unwrap();
    assert_eq!(short.metadata.sentences_used, Some(3));
    assert_eq!(short.metadata.total_sentences, Some(20));

    let long = summarize(&text, LengthClass::Long).unwrap();
    assert_eq!(long.metadata.sentences_used, Some(8));
}

#[test]
fn test_target_count_never_exceeds_sentence_total() {
    for total in 1..=40 {
        for length in [LengthClass::Short, LengthClass::Medium, LengthClass::Long] {
            let target = target_sentence_count(total, length);
            assert!(target >= 1 && target <= total, "{total} {length}");
        }
    }
}

#[test]
fn test_summary_meets_length_floor() {
    let text = "Tiny note one. Tiny note two. Tiny note three. Tiny note four. Tiny note five.";
    let summary = summarize(text, LengthClass::Short).unwrap();
    assert!(summary.text.chars().count() >= 50, "{}", summary.text);
    assert!(summary.text.starts_with("Tiny note one."));
}

#[test]
fn test_research_sentence_outscores_filler() {
    let scorer = SentenceScorer::default();
    let research = Sentence::new(3, "Research shows that 42% of users prefer X.");
    let filler = Sentence::new(3, "The cat sat on the warm mat by the door.");
    let diff = scorer.score(&research, 10) - scorer.score(&filler, 10);
    assert!(diff >= 5.0, "difference was {diff}");
}

#[test]
fn test_lenient_policy_drops_penalties() {
    let strict = SentenceScorer::default();
    let lenient = SentenceScorer::new(ScoringPolicy::lenient());
    let question = Sentence::new(5, "Why?");
    assert!(lenient.score(&question, 10) > strict.score(&question, 10));
    assert!(!lenient.explain(&question, 10).contains(&"penalty:short"));
}

#[test]
fn test_metadata_counts_characters() {
    let summary = summarize(ARTICLE, LengthClass::Short).unwrap();
    assert_eq!(summary.metadata.original_length, ARTICLE.chars().count());
    assert_eq!(summary.metadata.summary_length, summary.text.chars().count());
}

#[test]
fn test_select_uses_whole_document_when_target_covers_it() {
    let sentences = segment(&plain_document(2)).unwrap();
    let selection = select(&sentences, LengthClass::Long, &SentenceScorer::default());
    assert_eq!(selection.sentences_used, 2);
}
