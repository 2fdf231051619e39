//! Gemini API client module
//!
//! Encapsulates all generative-language API interactions for the remote provider.

use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};
use url::Url;

use super::prompt_builder::max_output_tokens;
use crate::core::config::AppConfig;
use crate::core::models::LengthClass;
use crate::errors::SummaryError;

/// Conservative input budget for the default model.
const MAX_INPUT_TOKENS: usize = 30_720;
const DEFAULT_MAX_RETRIES: usize = 3;

const TEMPERATURE: f64 = 0.3;
const TOP_K: u32 = 40;
const TOP_P: f64 = 0.95;

// Static HTTP client
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// Text of the first candidate's first part, trimmed.
#[must_use]
pub fn extract_text(response: &Value) -> Option<String> {
    response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Gemini API client for generating summaries
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    model_name: String,
    base_url: Url,
    max_retries: usize,
}

impl GeminiClient {
    #[must_use]
    pub fn new(api_key: String, model_name: String, base_url: Url) -> Self {
        Self {
            api_key,
            model_name,
            base_url,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, SummaryError> {
        let api_key = config
            .gemini_api_key
            .clone()
            .ok_or_else(|| SummaryError::ConfigError("Gemini API key not configured".to_string()))?;

        Ok(Self::new(
            api_key,
            config.gemini_model.clone(),
            config.gemini_base_url.clone(),
        ))
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// `{base}/models/{model}:generateContent?key={api_key}`
    pub fn endpoint(&self) -> Result<Url, SummaryError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!(
            "{}/models/{}:generateContent",
            base, self.model_name
        ))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    #[must_use]
    pub fn build_request_body(&self, prompt: &str, length: LengthClass) -> Value {
        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "topK": TOP_K,
                "topP": TOP_P,
                "maxOutputTokens": max_output_tokens(length),
            }
        })
    }

    /// # Errors
    ///
    /// Returns an error if the prompt is over the input budget, the request
    /// fails after retries, or the response carries no text.
    pub async fn generate(&self, prompt: &str, length: LengthClass) -> Result<String, SummaryError> {
        #[cfg(feature = "debug-logs")]
        info!("Using Gemini prompt:\n{}", prompt);

        let estimated_input_tokens = estimate_tokens(prompt);
        info!(
            model = %self.model_name,
            "Generating summary, estimated input tokens: {}",
            estimated_input_tokens
        );

        if estimated_input_tokens > MAX_INPUT_TOKENS {
            return Err(SummaryError::ProviderError(format!(
                "Content too long for remote summarization ({} estimated tokens)",
                estimated_input_tokens
            )));
        }

        let url = self.endpoint()?;
        let body = self.build_request_body(prompt, length);

        let strategy = ExponentialBackoff::from_millis(2)
            .factor(50)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(self.max_retries);

        RetryIf::start(
            strategy,
            || self.send_once(&url, &body),
            |e: &SummaryError| {
                let retry = matches!(e, SummaryError::HttpError(_));
                if retry {
                    warn!("Gemini request failed, retrying: {}", e);
                }
                retry
            },
        )
        .await
    }

    async fn send_once(&self, url: &Url, body: &Value) -> Result<String, SummaryError> {
        let response = HTTP_CLIENT
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                SummaryError::HttpError(format!("Gemini API request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        debug!("Gemini responded with status {}", status);

        if !status.is_success() {
            let error_body: Value = response.json().await.unwrap_or(Value::Null);
            let message = error_body
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string();

            return Err(if is_transient(status) {
                SummaryError::HttpError(format!("Gemini API returned {}: {}", status, message))
            } else {
                SummaryError::ProviderError(format!("Gemini API Error: {}", message))
            });
        }

        let response_json: Value = response.json().await.map_err(|e| {
            SummaryError::ProviderError(format!("Failed to parse Gemini response: {}", e))
        })?;

        extract_text(&response_json)
            .ok_or_else(|| SummaryError::ProviderError("No summary generated".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeminiClient {
        GeminiClient::new(
            "test_key".to_string(),
            "gemini-pro".to_string(),
            Url::parse("https://generativelanguage.googleapis.com/v1beta/").unwrap(),
        )
    }

    #[test]
    fn test_endpoint_includes_model_and_key() {
        let url = client().endpoint().unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent?key=test_key"
        );
    }

    #[test]
    fn test_request_body_uses_length_budget() {
        let body = client().build_request_body("prompt text", LengthClass::Long);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "prompt text");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 2048);
        assert_eq!(body["generationConfig"]["topK"], 40);
        assert_eq!(body["generationConfig"]["temperature"], 0.3);
    }

    #[test]
    fn test_extract_text_reads_first_candidate() {
        let response = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "  A short summary.  " }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        });
        assert_eq!(extract_text(&response), Some("A short summary.".to_string()));
    }

    #[test]
    fn test_extract_text_missing_or_blank() {
        assert_eq!(extract_text(&json!({ "candidates": [] })), None);
        assert_eq!(
            extract_text(&json!({ "candidates": [{ "content": { "parts": [{ "text": "   " }] } }] })),
            None
        );
    }

    #[tokio::test]
    async fn test_generate_rejects_oversized_prompt_without_network() {
        let big_text = "a".repeat(MAX_INPUT_TOKENS * 4 + 100);
        let res = client().generate(&big_text, LengthClass::Medium).await;
        match res {
            Err(SummaryError::ProviderError(msg)) => assert!(msg.contains("too long")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_reports_transport_failure() {
        let client = GeminiClient::new(
            "test_key".to_string(),
            "gemini-pro".to_string(),
            Url::parse("http://127.0.0.1:9").unwrap(),
        )
        .with_max_retries(0);
        let res = client.generate("prompt", LengthClass::Short).await;
        assert!(matches!(res, Err(SummaryError::HttpError(_))));
    }
}
