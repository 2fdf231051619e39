//! Prompt templates for the remote provider.

use crate::core::models::{LengthClass, Style, SummaryOptions};
use crate::errors::SummaryError;

/// List of disallowed patterns in the language parameter (prompt injection protection)
pub const DISALLOWED_PATTERNS: [&str; 4] = ["system:", "assistant:", "user:", "{{"];

/// Maximum length allowed for the language parameter
pub const MAX_LANGUAGE_LENGTH: usize = 32;

#[must_use]
pub fn length_instruction(length: LengthClass) -> &'static str {
    match length {
        LengthClass::Short => "in 2-3 sentences",
        LengthClass::Medium => "in 1-2 paragraphs",
        LengthClass::Long => "in 3-4 detailed paragraphs",
    }
}

#[must_use]
pub fn style_instruction(style: Style) -> &'static str {
    match style {
        Style::Informative => "Focus on key facts and main points",
        Style::Analytical => "Provide analysis and insights",
        Style::Casual => "Use simple, conversational language",
        Style::Academic => "Use formal, scholarly tone",
        Style::Bullet => "Format as bullet points",
    }
}

/// Output-token budget requested from the model.
#[must_use]
pub fn max_output_tokens(length: LengthClass) -> u32 {
    match length {
        LengthClass::Short => 512,
        LengthClass::Medium => 1024,
        LengthClass::Long => 2048,
    }
}

/// Validates the requested response language and maps `en` to its name.
pub fn sanitize_language(language: &str) -> Result<String, String> {
    let language = language.trim();

    if language.is_empty() || language.eq_ignore_ascii_case("en") {
        return Ok("English".to_string());
    }

    if language.chars().count() > MAX_LANGUAGE_LENGTH {
        return Err(format!(
            "Language exceeds maximum length of {} characters",
            MAX_LANGUAGE_LENGTH
        ));
    }

    for pattern in DISALLOWED_PATTERNS.iter() {
        if language.to_lowercase().contains(pattern) {
            return Err(format!("Language contains disallowed pattern: {}", pattern));
        }
    }

    Ok(language.chars().filter(|c| !c.is_control()).collect())
}

/// Remove control characters other than line breaks and tabs.
#[must_use]
pub fn sanitize_content(raw: &str) -> String {
    raw.chars()
        .filter(|&c| !c.is_control() || c == '\n' || c == '\t')
        .collect()
}

pub fn build_prompt(content: &str, options: &SummaryOptions) -> Result<String, SummaryError> {
    let language = sanitize_language(&options.language).map_err(SummaryError::ConfigError)?;

    Ok(format!(
        "Please summarize the following content {}. {}. Respond in {}.\n\nContent to summarize:\n{}\n\nSummary:",
        length_instruction(options.length),
        style_instruction(options.style),
        language,
        sanitize_content(content)
    ))
}
