use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SummaryError {
    #[error("Insufficient content to summarize. Please provide at least 20 characters of text.")]
    InsufficientContent,

    #[error("Unable to split this content into sentences.")]
    NoSentences,

    #[error("No key points could be extracted from this content.")]
    NoKeyPoints,

    #[error("Summary provider failed: {0}")]
    ProviderError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl SummaryError {
    /// Whether the error came from the remote provider rather than the content itself.
    #[must_use]
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            SummaryError::ProviderError(_) | SummaryError::HttpError(_)
        )
    }
}

impl From<reqwest::Error> for SummaryError {
    fn from(error: reqwest::Error) -> Self {
        SummaryError::HttpError(error.to_string())
    }
}

impl From<url::ParseError> for SummaryError {
    fn from(error: url::ParseError) -> Self {
        SummaryError::ConfigError(format!("invalid URL: {}", error))
    }
}
