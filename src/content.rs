//! Turning page content into plain text the engine can segment.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::io::Cursor;

/// Rendering width for html2text. Wide enough that paragraphs stay on one line.
const RENDER_WIDTH: usize = 10_000;

const KEPT_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '(', ')', '-', '\'', '"', '%', '$', '€', '£', '¥', '&',
];

/// Main-content containers, most specific first.
const MAIN_CONTENT_SELECTORS: &[&str] = &[
    "article",
    r#"[role="main"]"#,
    ".content",
    ".post-content",
    ".entry-content",
    ".article-content",
    "main",
    ".main-content",
    ".post-body",
    ".story-body",
];

/// A container is only trusted when it renders to more than this many characters.
const MIN_MAIN_CONTENT_CHARS: usize = 100;

const NON_CONTENT_SELECTOR: &str = "script, style, noscript, iframe, template";

const BOILERPLATE_SELECTOR: &str = "nav, footer, aside, header, .ad, .advertisement, .ads, \
     .sidebar, .menu, .comments, .social-share, .related-posts";

/// Class or id fragments that mark a generic `div`/`section` as page chrome.
const BOILERPLATE_MARKERS: &[&str] = &[
    "navbar",
    "cookie",
    "consent",
    "banner",
    "newsletter",
    "subscribe",
    "promo",
];

// html2text renders links as `[text][3]` with a `[3]: url` footnote list.
static LINK_REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\]\[\d+\]").expect("static regex compile"));
static LINK_FOOTNOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\[\d+\]:\s*\S*\s*$").expect("static regex compile"));

static PARAGRAPH_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("static regex compile"));

fn is_kept(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c.is_whitespace() || KEPT_PUNCTUATION.contains(&c)
}

/// Collapse whitespace and drop decorative characters, one paragraph at a time.
///
/// Paragraphs stay separated by a blank line so the key-point paragraph pass
/// still sees them.
#[must_use]
pub fn clean_text(text: &str) -> String {
    PARAGRAPH_BREAK_RE
        .split(text)
        .map(|paragraph| {
            let kept: String = paragraph.chars().filter(|&c| is_kept(c)).collect();
            kept.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .filter(|paragraph| !paragraph.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn class_and_id_lc(el: &ElementRef) -> String {
    let value = el.value();
    format!(
        "{} {}",
        value.attr("class").unwrap_or_default(),
        value.attr("id").unwrap_or_default()
    )
    .to_ascii_lowercase()
}

fn is_boilerplate_container(el: &ElementRef) -> bool {
    let marker = class_and_id_lc(el);
    BOILERPLATE_MARKERS.iter().any(|m| marker.contains(m))
}

/// Detach every element matching `selector` for which `remove` holds.
fn detach_where<F>(doc: &mut Html, selector: &str, remove: F)
where
    F: Fn(&ElementRef) -> bool,
{
    let Ok(selector) = Selector::parse(selector) else {
        return;
    };
    let ids: Vec<_> = doc
        .select(&selector)
        .filter(|el| remove(el))
        .map(|el| el.id())
        .collect();

    for id in ids {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }
}

fn render(html: &str) -> String {
    let rendered = html2text::from_read(Cursor::new(html.as_bytes()), RENDER_WIDTH)
        .unwrap_or_else(|_| html.to_string());

    let without_footnotes = LINK_FOOTNOTE_RE.replace_all(&rendered, "");
    let without_refs = LINK_REF_RE.replace_all(&without_footnotes, "]");
    without_refs.trim().to_string()
}

/// Text of the first main-content container that renders to enough text.
fn main_content(doc: &Html) -> Option<String> {
    MAIN_CONTENT_SELECTORS
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .filter_map(|selector| doc.select(&selector).next().map(|el| render(&el.html())))
        .find(|text| text.chars().count() > MIN_MAIN_CONTENT_CHARS)
}

/// Render HTML to plain text.
///
/// Scripts, styles, navigation, headers, footers, sidebars, comments and ad
/// blocks are removed first. The first main-content container (`article`,
/// `[role="main"]`, `main`, ...) with enough text wins; otherwise the whole
/// remaining document is rendered.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let mut doc = Html::parse_document(html);
    detach_where(&mut doc, NON_CONTENT_SELECTOR, |_| true);
    detach_where(&mut doc, BOILERPLATE_SELECTOR, |_| true);
    detach_where(&mut doc, "div, section", is_boilerplate_container);

    main_content(&doc).unwrap_or_else(|| render(&doc.html()))
}
