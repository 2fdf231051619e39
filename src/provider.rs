//! Summary providers and the orchestrator that chooses between them.
//!
//! The local provider is always available. A remote provider is consulted
//! first when configured, and any failure there falls back to local output.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::ai::{GeminiClient, build_prompt};
use crate::core::config::AppConfig;
use crate::core::models::{
    KeyPoints, KeyPointsMetadata, ProviderKind, Style, Summary, SummaryMetadata, SummaryOptions,
};
use crate::errors::SummaryError;
use crate::local::keypoints::{POINT_SEPARATOR, format_points};
use crate::local::{self, MIN_INPUT_CHARS, ScoringPolicy, SentenceScorer};

#[async_trait]
pub trait Summarize: Send + Sync {
    fn kind(&self) -> ProviderKind;

    async fn summarize(
        &self,
        text: &str,
        options: &SummaryOptions,
    ) -> Result<Summary, SummaryError>;

    async fn extract_key_points(
        &self,
        text: &str,
        options: &SummaryOptions,
    ) -> Result<KeyPoints, SummaryError>;
}

/// Deterministic extractive provider.
#[derive(Debug, Default)]
pub struct LocalProvider {
    scorer: SentenceScorer,
}

impl LocalProvider {
    #[must_use]
    pub fn new(policy: ScoringPolicy) -> Self {
        Self {
            scorer: SentenceScorer::new(policy),
        }
    }
}

#[async_trait]
impl Summarize for LocalProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Local
    }

    async fn summarize(
        &self,
        text: &str,
        options: &SummaryOptions,
    ) -> Result<Summary, SummaryError> {
        local::summarize_with(text, options.length, &self.scorer)
    }

    async fn extract_key_points(
        &self,
        text: &str,
        options: &SummaryOptions,
    ) -> Result<KeyPoints, SummaryError> {
        local::extract_key_points(text, options.length)
    }
}

const LIST_MARKERS: &[char] = &['•', '-', '*', '#'];

/// Strip the list or heading marker an LLM puts in front of a line.
fn strip_list_marker(line: &str) -> &str {
    let line = line.trim_start_matches(|c: char| c.is_whitespace() || LIST_MARKERS.contains(&c));
    let line = line.trim_end();

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        if let Some(rest) = line[digits..]
            .strip_prefix('.')
            .or_else(|| line[digits..].strip_prefix(')'))
        {
            return rest.trim_start();
        }
    }
    line
}

/// Re-render free-form model output with the local bullet format.
///
/// Preamble lines ending in `:` are dropped, as is markdown bold emphasis.
#[must_use]
pub fn normalize_bullets(generated: &str) -> String {
    let points: Vec<String> = generated
        .lines()
        .map(|line| strip_list_marker(line).replace("**", "").trim().to_string())
        .filter(|line| !line.is_empty() && !line.ends_with(':'))
        .collect();

    format_points(points.iter().map(String::as_str))
}

/// Generative provider backed by the Gemini API.
#[derive(Debug, Clone)]
pub struct RemoteProvider {
    client: GeminiClient,
}

impl RemoteProvider {
    #[must_use]
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Summarize for RemoteProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn summarize(
        &self,
        text: &str,
        options: &SummaryOptions,
    ) -> Result<Summary, SummaryError> {
        let prompt = build_prompt(text, options)?;
        let generated = self.client.generate(&prompt, options.length).await?;

        Ok(Summary {
            metadata: SummaryMetadata {
                original_length: text.chars().count(),
                summary_length: generated.chars().count(),
                sentences_used: None,
                total_sentences: None,
            },
            text: generated,
            provider: ProviderKind::Gemini,
        })
    }

    async fn extract_key_points(
        &self,
        text: &str,
        options: &SummaryOptions,
    ) -> Result<KeyPoints, SummaryError> {
        let bullet_options = SummaryOptions {
            style: Style::Bullet,
            ..options.clone()
        };
        let prompt = build_prompt(text, &bullet_options)?;
        let generated = self.client.generate(&prompt, options.length).await?;

        let rendered = normalize_bullets(&generated);
        if rendered.is_empty() {
            return Err(SummaryError::ProviderError(
                "No key points generated".to_string(),
            ));
        }

        Ok(KeyPoints {
            metadata: KeyPointsMetadata {
                original_length: text.chars().count(),
                key_points_count: rendered.split(POINT_SEPARATOR).count(),
            },
            text: rendered,
            provider: ProviderKind::Gemini,
        })
    }
}

/// Tries the remote provider when one is configured, otherwise or on failure
/// uses the local engine.
pub struct Summarizer {
    remote: Option<Box<dyn Summarize>>,
    local: LocalProvider,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::local()
    }
}

impl Summarizer {
    #[must_use]
    pub fn local() -> Self {
        Self {
            remote: None,
            local: LocalProvider::default(),
        }
    }

    #[must_use]
    pub fn with_remote(mut self, remote: Box<dyn Summarize>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Local scoring without the short, question and exclamation penalties
    /// when `policy` says so.
    #[must_use]
    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.local = LocalProvider::new(policy);
        self
    }

    /// Wire the Gemini provider only when it is selected and has a key.
    pub fn from_config(config: &AppConfig) -> Result<Self, SummaryError> {
        let summarizer = Self::local();
        if !config.remote_enabled() {
            if config.provider == ProviderKind::Gemini {
                warn!("AI_PROVIDER is gemini but GEMINI_API_KEY is not set, using local provider");
            }
            return Ok(summarizer);
        }

        let client = GeminiClient::from_config(config)?;
        info!(model = client.model_name(), "Remote provider enabled");
        Ok(summarizer.with_remote(Box::new(RemoteProvider::new(client))))
    }

    #[must_use]
    pub fn remote_kind(&self) -> Option<ProviderKind> {
        self.remote.as_ref().map(|r| r.kind())
    }

    pub async fn summarize(
        &self,
        text: &str,
        options: &SummaryOptions,
    ) -> Result<Summary, SummaryError> {
        ensure_enough_content(text)?;

        if let Some(remote) = &self.remote {
            match remote.summarize(text, options).await {
                Ok(summary) => return Ok(summary),
                Err(e) => warn!(
                    provider = %remote.kind(),
                    "Remote summarization failed, falling back to local: {}",
                    e
                ),
            }
        }

        self.local.summarize(text, options).await
    }

    pub async fn extract_key_points(
        &self,
        text: &str,
        options: &SummaryOptions,
    ) -> Result<KeyPoints, SummaryError> {
        ensure_enough_content(text)?;

        if let Some(remote) = &self.remote {
            match remote.extract_key_points(text, options).await {
                Ok(points) => return Ok(points),
                Err(e) => warn!(
                    provider = %remote.kind(),
                    "Remote key point extraction failed, falling back to local: {}",
                    e
                ),
            }
        }

        self.local.extract_key_points(text, options).await
    }
}

fn ensure_enough_content(text: &str) -> Result<(), SummaryError> {
    if text.trim().chars().count() < MIN_INPUT_CHARS {
        return Err(SummaryError::InsufficientContent);
    }
    Ok(())
}
