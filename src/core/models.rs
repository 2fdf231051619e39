use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SummaryError;

/// Caller-selected verbosity of the output.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LengthClass {
    Short,
    #[default]
    Medium,
    Long,
}

impl LengthClass {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LengthClass::Short => "short",
            LengthClass::Medium => "medium",
            LengthClass::Long => "long",
        }
    }
}

impl fmt::Display for LengthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthClass {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(LengthClass::Short),
            "medium" => Ok(LengthClass::Medium),
            "long" => Ok(LengthClass::Long),
            other => Err(SummaryError::ConfigError(format!(
                "unknown length class: {}",
                other
            ))),
        }
    }
}

/// Tone requested from the remote provider. The local engine ignores it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Informative,
    Analytical,
    Casual,
    Academic,
    Bullet,
}

/// What the caller wants back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    Summary,
    KeyPoints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Local,
    Gemini,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Local => f.write_str("local"),
            ProviderKind::Gemini => f.write_str("gemini"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOptions {
    pub length: LengthClass,
    pub style: Style,
    pub language: String,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            length: LengthClass::Medium,
            style: Style::Informative,
            language: "en".to_string(),
        }
    }
}

impl SummaryOptions {
    #[must_use]
    pub fn with_length(length: LengthClass) -> Self {
        Self {
            length,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetadata {
    pub original_length: usize,
    pub summary_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentences_used: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_sentences: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPointsMetadata {
    pub original_length: usize,
    pub key_points_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub text: String,
    pub provider: ProviderKind,
    pub metadata: SummaryMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPoints {
    pub text: String,
    pub provider: ProviderKind,
    pub metadata: KeyPointsMetadata,
}

impl KeyPoints {
    /// Individual bullet lines, split on the blank-line separator.
    pub fn points(&self) -> impl Iterator<Item = &str> {
        self.text
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Metadata with a generation timestamp attached after the pure computation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stamped<T> {
    #[serde(flatten)]
    pub inner: T,
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPayload {
    pub success: bool,
    pub summary: String,
    pub provider: ProviderKind,
    pub metadata: Stamped<SummaryMetadata>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPointsPayload {
    pub success: bool,
    pub key_points: String,
    pub provider: ProviderKind,
    pub metadata: Stamped<KeyPointsMetadata>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailurePayload {
    pub success: bool,
    pub error: String,
}

/// JSON envelope handed to renderers: `{"success": true, ...}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SummaryResponse {
    Summary(SummaryPayload),
    KeyPoints(KeyPointsPayload),
    Failure(FailurePayload),
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl SummaryResponse {
    #[must_use]
    pub fn failure(error: &SummaryError) -> Self {
        SummaryResponse::Failure(FailurePayload {
            success: false,
            error: error.to_string(),
        })
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, SummaryResponse::Failure(_))
    }
}

impl From<Result<Summary, SummaryError>> for SummaryResponse {
    fn from(result: Result<Summary, SummaryError>) -> Self {
        match result {
            Ok(summary) => SummaryResponse::Summary(SummaryPayload {
                success: true,
                summary: summary.text,
                provider: summary.provider,
                metadata: Stamped {
                    inner: summary.metadata,
                    generated_at: timestamp(),
                },
            }),
            Err(e) => SummaryResponse::failure(&e),
        }
    }
}

impl From<Result<KeyPoints, SummaryError>> for SummaryResponse {
    fn from(result: Result<KeyPoints, SummaryError>) -> Self {
        match result {
            Ok(points) => SummaryResponse::KeyPoints(KeyPointsPayload {
                success: true,
                key_points: points.text,
                provider: points.provider,
                metadata: Stamped {
                    inner: points.metadata,
                    generated_at: timestamp(),
                },
            }),
            Err(e) => SummaryResponse::failure(&e),
        }
    }
}
