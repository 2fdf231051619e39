//! pagesum - summaries and key points for web page text.
//!
//! The crate is built around a deterministic, network-free extraction engine:
//! 1. A sentence segmenter that splits page text into indexed sentences
//! 2. An extractive summarizer that scores sentences and keeps the best ones in reading order
//! 3. A key-point extractor that ranks pattern-matched sentences and paragraph leads
//!
//! # Providers
//!
//! The engine is the local provider. When `AI_PROVIDER=gemini` and an API key is
//! configured, a remote Gemini provider is tried first and the local provider
//! takes over whenever it fails.
//!
//! # Example
//!
//! ```no_run
//! use pagesum::core::config::AppConfig;
//! use pagesum::core::models::{LengthClass, SummaryOptions};
//! use pagesum::provider::Summarizer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Set up structured logging
//!     pagesum::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let summarizer = Summarizer::from_config(&config)?;
//!
//!     let text = std::fs::read_to_string("article.txt")?;
//!     let options = SummaryOptions::with_length(LengthClass::Short);
//!
//!     let summary = summarizer.summarize(&text, &options).await?;
//!     println!("Summary ({}): {}", summary.provider, summary.text);
//!
//!     let points = summarizer.extract_key_points(&text, &options).await?;
//!     for point in points.points() {
//!         println!("{}", point);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod ai;
pub mod content;
pub mod core;
pub mod errors;
pub mod local;
pub mod provider;
pub mod text;

pub use errors::SummaryError;
pub use local::{extract_key_points, summarize};
pub use provider::{LocalProvider, RemoteProvider, Summarize, Summarizer};

/// Configure structured logging with JSON output.
///
/// Installs a tracing-subscriber JSON formatter with target names. Intended for
/// hosts that collect logs as JSON lines; the CLI uses a plain formatter instead.
///
/// # Example
///
/// ```
/// // Initialize structured logging once at startup
/// pagesum::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry().with(fmt_layer).init();
}
