#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pagesum::content::{clean_text, html_to_text};
use pagesum::core::config::AppConfig;
use pagesum::core::models::{LengthClass, Mode, Style, SummaryOptions, SummaryResponse};
use pagesum::local::ScoringPolicy;
use pagesum::provider::Summarizer;

/// Summarize page text or pull out its key points.
#[derive(Debug, Parser)]
#[command(name = "pagesum", version, about)]
struct Cli {
    /// Input file (default: stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// What to produce
    #[arg(short, long, value_enum, default_value = "summary")]
    mode: Mode,

    /// Output length (default: SUMMARY_LENGTH or medium)
    #[arg(short, long, value_enum)]
    length: Option<LengthClass>,

    /// Tone requested from the remote provider
    #[arg(short, long, value_enum, default_value = "informative")]
    style: Style,

    /// Response language for the remote provider
    #[arg(long, default_value = "en")]
    language: String,

    /// Treat the input as HTML
    #[arg(long)]
    html: bool,

    /// Print the JSON response envelope
    #[arg(long)]
    json: bool,

    /// Never call the remote provider
    #[arg(long)]
    local: bool,

    /// Score sentences without the short, question and exclamation penalties
    #[arg(long)]
    lenient: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

async fn run(cli: Cli) -> Result<SummaryResponse> {
    let config = AppConfig::from_env().context("invalid configuration")?;

    let mut summarizer = if cli.local {
        Summarizer::local()
    } else {
        Summarizer::from_config(&config)?
    };
    if cli.lenient {
        summarizer = summarizer.with_policy(ScoringPolicy::lenient());
    }

    let raw = read_input(cli.input.as_ref()).await?;
    let text = if cli.html {
        clean_text(&html_to_text(&raw))
    } else {
        clean_text(&raw)
    };

    let options = SummaryOptions {
        length: cli.length.unwrap_or(config.default_length),
        style: cli.style,
        language: cli.language,
    };
    info!(
        mode = ?cli.mode,
        length = %options.length,
        "Processing {} characters",
        text.chars().count()
    );

    let response: SummaryResponse = match cli.mode {
        Mode::Summary => summarizer.summarize(&text, &options).await.into(),
        Mode::KeyPoints => summarizer.extract_key_points(&text, &options).await.into(),
    };
    Ok(response)
}

fn render(response: &SummaryResponse) -> String {
    match response {
        SummaryResponse::Summary(payload) => payload.summary.clone(),
        SummaryResponse::KeyPoints(payload) => payload.key_points.clone(),
        SummaryResponse::Failure(payload) => payload.error.clone(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let as_json = cli.json;

    let response = match run(cli).await {
        Ok(response) => response,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    if as_json {
        match serde_json::to_string_pretty(&response) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: failed to serialize response: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else if response.is_success() {
        println!("{}", render(&response));
    }

    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        eprintln!("Error: {}", render(&response));
        ExitCode::FAILURE
    }
}
