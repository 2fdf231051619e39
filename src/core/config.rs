use std::env;
use url::Url;

use crate::core::models::{LengthClass, ProviderKind};
use crate::errors::SummaryError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: ProviderKind,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: Url,
    pub default_length: LengthClass,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Local,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: Url::parse(DEFAULT_GEMINI_BASE_URL)
                .expect("default Gemini base URL parses"),
            default_length: LengthClass::Medium,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, SummaryError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SummaryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match non_empty("AI_PROVIDER").as_deref().map(str::trim) {
            None => ProviderKind::Local,
            Some(p) if p.eq_ignore_ascii_case("local") => ProviderKind::Local,
            Some(p) if p.eq_ignore_ascii_case("gemini") => ProviderKind::Gemini,
            Some(other) => {
                return Err(SummaryError::ConfigError(format!(
                    "AI_PROVIDER: unknown provider {}",
                    other
                )));
            }
        };

        let gemini_base_url = match non_empty("GEMINI_BASE_URL") {
            Some(raw) => Url::parse(raw.trim())
                .map_err(|e| SummaryError::ConfigError(format!("GEMINI_BASE_URL: {}", e)))?,
            None => Url::parse(DEFAULT_GEMINI_BASE_URL)?,
        };

        let default_length = match non_empty("SUMMARY_LENGTH") {
            Some(raw) => raw.parse()?,
            None => LengthClass::Medium,
        };

        Ok(Self {
            provider,
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            gemini_model: non_empty("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url,
            default_length,
        })
    }

    /// The remote provider is used only when selected and a key is present.
    #[must_use]
    pub fn remote_enabled(&self) -> bool {
        self.provider == ProviderKind::Gemini && self.gemini_api_key.is_some()
    }
}
