use pagesum::core::models::{LengthClass, ProviderKind};
use pagesum::errors::SummaryError;
use pagesum::local::extract_key_points;
use pagesum::local::keypoints::{BULLET, key_point_cap};
use pagesum::text::{overlap_ratio, significant_words};

const REPORT: &str = "Remote work has changed how teams plan their weeks.\n\n\
    Research shows that 58% of employees feel more focused at home. \
    Studies found that commuting time dropped by an average of 40 minutes per day. \
    Managers should set clear goals instead of tracking hours online. \
    The key finding is that trust matters more than location.\n\n\
    Because meetings moved online, calendars became more crowded. \
    Research shows that 58% of employees feel more focused when working at home. \
    Companies saved $2 million on office space last year. \
    Overall, the shift appears permanent for 3,000 workers surveyed.\n\n\
    Accept all cookies to continue. Click here to subscribe to our newsletter.";

fn bullets(text: &str) -> Vec<&str> {
    text.split("\n\n").collect()
}

#[test]
fn test_key_points_use_bullet_format() {
    let points = extract_key_points(REPORT, LengthClass::Long).unwrap();
    assert_eq!(points.provider, ProviderKind::Local);

    for line in bullets(&points.text) {
        assert!(line.starts_with(BULLET), "missing bullet: {line}");
        assert!(line.ends_with(['.', '!', '?']), "missing punctuation: {line}");
    }
    assert_eq!(points.metadata.key_points_count, bullets(&points.text).len());
    assert_eq!(points.points().count(), points.metadata.key_points_count);
}

#[test]
fn test_key_points_respect_cap() {
    for length in [LengthClass::Short, LengthClass::Medium, LengthClass::Long] {
        let points = extract_key_points(REPORT, length).unwrap();
        assert!(points.metadata.key_points_count <= key_point_cap(length));
    }
}

#[test]
fn test_key_points_are_not_near_duplicates() {
    let points = extract_key_points(REPORT, LengthClass::Long).unwrap();
    let word_sets: Vec<_> = points.points().map(significant_words).collect();

    for (i, a) in word_sets.iter().enumerate() {
        for b in &word_sets[i + 1..] {
            assert!(overlap_ratio(a, b) <= 0.6);
        }
    }
}

#[test]
fn test_boilerplate_is_not_promoted() {
    let points = extract_key_points(REPORT, LengthClass::Long).unwrap();
    assert!(!points.text.contains("cookies"));
    assert!(!points.text.contains("subscribe"));
}

#[test]
fn test_strong_patterns_come_first() {
    let points = extract_key_points(REPORT, LengthClass::Short).unwrap();
    let first = points.points().next().unwrap();
    assert!(
        first.contains("Research shows") || first.contains("key finding"),
        "unexpected first point: {first}"
    );
}

#[test]
fn test_key_points_are_deterministic() {
    assert_eq!(
        extract_key_points(REPORT, LengthClass::Medium),
        extract_key_points(REPORT, LengthClass::Medium)
    );
}

#[test]
fn test_plain_text_keeps_opening_sentence() {
    let text = "The river bends twice before reaching town. \
                Its banks are lined with old willow trees.";
    let points = extract_key_points(text, LengthClass::Medium).unwrap();
    assert!(points.metadata.key_points_count >= 1);
    assert!(points.text.starts_with("• The river bends twice before reaching town."));
}

#[test]
fn test_short_input_is_rejected() {
    assert_eq!(
        extract_key_points("Too short.", LengthClass::Short),
        Err(SummaryError::InsufficientContent)
    );
}

#[test]
fn test_text_without_usable_sentences_yields_no_key_points() {
    let text = "Cookies help us. Menu. Log in to see more of this page.";
    assert_eq!(
        extract_key_points(text, LengthClass::Medium),
        Err(SummaryError::NoKeyPoints)
    );
}

const FOCUSED_PARAGRAPH: &str = "Research shows that remote teams ship features faster than office teams. \
    Firstly, written plans reduce the number of meetings. \
    Managers should publish goals at the start of each quarter. \
    Studies found that 64% of engineers prefer asynchronous updates.";

const HARBOR_PARAGRAPH: &str = "The harbor town sits on a narrow strip of land between two hills. \
    It has two piers and a market.";

#[test]
fn test_paragraph_leads_skipped_when_sentences_suffice() {
    let text = format!("{FOCUSED_PARAGRAPH}\n\n{HARBOR_PARAGRAPH}");
    let points = extract_key_points(&text, LengthClass::Long).unwrap();

    assert_eq!(points.metadata.key_points_count, 4);
    assert!(!points.text.contains("harbor"), "{}", points.text);
}

#[test]
fn test_paragraph_leads_join_when_sentences_are_scarce() {
    let focused = FOCUSED_PARAGRAPH.replace(
        "Managers should publish goals at the start of each quarter. ",
        "",
    );
    let text = format!("{focused}\n\n{HARBOR_PARAGRAPH}");
    let points = extract_key_points(&text, LengthClass::Long).unwrap();

    assert!(
        points
            .points()
            .any(|p| p.contains("The harbor town sits on a narrow strip of land between two hills.")),
        "{}",
        points.text
    );
}

#[test]
fn test_fallback_bullets_plain_sentences() {
    let text = "Tiny lead. Small bit. The cat sat on a warm mat today. Dogs ran across the park fast.";
    let points = extract_key_points(text, LengthClass::Medium).unwrap();

    assert_eq!(points.provider, ProviderKind::Local);
    assert_eq!(points.metadata.key_points_count, 2);
    assert_eq!(
        points.text,
        "• The cat sat on a warm mat today.\n\n• Dogs ran across the park fast."
    );
}
