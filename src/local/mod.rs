//! The local, network-free extraction engine.

pub mod keypoints;
pub mod rules;
pub mod summarizer;

/// Inputs shorter than this, after trimming, are rejected.
pub const MIN_INPUT_CHARS: usize = 20;

pub use keypoints::{KeyPoint, Provenance, extract_key_points};
pub use summarizer::{ScoringPolicy, SentenceScorer, summarize, summarize_with};
