//! Command-line entry point for the research pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use deepresearch::config::Config;
use deepresearch::pipeline::{Pipeline, RunRequest, Runner};
use deepresearch::providers::{GeminiGenerator, SearchDepth, TavilySearch};

#[derive(Debug, Parser)]
#[command(
    name = "deepresearch",
    version,
    about = "Research a topic into a cited, fact-checked answer"
)]
struct Cli {
    /// Topic to research
    #[arg(short, long)]
    topic: String,

    /// Search depth
    #[arg(long, value_enum, default_value_t = DepthArg::Basic)]
    depth: DepthArg,

    /// Number of search queries to generate
    #[arg(long, default_value_t = 3)]
    queries: usize,

    /// Write the full outcome as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DepthArg {
    Basic,
    Advanced,
}

impl From<DepthArg> for SearchDepth {
    fn from(depth: DepthArg) -> Self {
        match depth {
            DepthArg::Basic => SearchDepth::Basic,
            DepthArg::Advanced => SearchDepth::Advanced,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging();

    let config = Config::from_env();
    config.validate()?;
    let gemini_key = config
        .gemini_api_key
        .clone()
        .context("GEMINI_API_KEY is not set")?;
    let tavily_key = config
        .tavily_api_key
        .clone()
        .context("TAVILY_API_KEY is not set")?;

    let text = GeminiGenerator::connect(gemini_key, &config.model, &config.fallback_models)
        .await
        .context("no text-generation model is reachable")?;
    info!(model = text.model(), "text generation ready");
    let search = TavilySearch::new(tavily_key);

    let pipeline = Pipeline::standard(Arc::new(text), Arc::new(search), &config);
    let request = RunRequest::new(cli.topic.clone())
        .with_depth(cli.depth.into())
        .with_query_count(cli.queries);
    let outcome = Runner::new(pipeline).run(request).await;

    if let Some(path) = &cli.output {
        let json = serde_json::to_string_pretty(&outcome)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "outcome written");
    }

    if outcome.is_complete() {
        println!("{}", outcome.final_answer.as_deref().unwrap_or(""));
        Ok(())
    } else {
        anyhow::bail!(
            "run failed: {}",
            outcome.error.as_deref().unwrap_or("unknown error")
        )
    }
}
