//! Text primitives shared by the local extraction algorithms.

pub mod segmenter;
pub mod words;

pub use segmenter::{Sentence, first_sentence, normalize_whitespace, segment};
pub use words::{overlap_ratio, significant_words};
