//! Intent expansion CLI
//!
//! Reads a customer-message corpus and the existing intent hierarchy, runs
//! the expansion pipeline and writes a JSON and a Markdown report:
//! - keyword theme detection and clustering
//! - confidence-scored intent proposals
//! - guardrail review
//! - optional advisory themes from an LLM backend (`--use-llm`)

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod input;
mod output;

use config::{CliConfig, Overrides};
use error::CliResult;
use expansion_oracle::OracleProvider;
use output::ReportPaths;

/// LLM backend selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProviderArg {
    Openai,
    Anthropic,
    Google,
}

impl From<ProviderArg> for OracleProvider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Openai => OracleProvider::OpenAi,
            ProviderArg::Anthropic => OracleProvider::Anthropic,
            ProviderArg::Google => OracleProvider::Google,
        }
    }
}

/// Intent expansion application
#[derive(Parser)]
#[command(name = "intent-expansion")]
#[command(about = "Analyze customer messages to discover missing intents", long_about = None)]
#[command(version)]
struct Cli {
    /// Input JSON file with customer messages and the intent hierarchy
    input_file: PathBuf,

    /// Output path (writes <OUTPUT>.json and <OUTPUT>.md)
    #[arg(short, long, default_value = "intent_analysis_report")]
    output: String,

    /// Configuration file path (TOML)
    #[arg(short, long, env = "INTENT_EXPANSION_CONFIG")]
    config: Option<PathBuf>,

    /// Ask an LLM backend for advisory themes (requires an API key)
    #[arg(long)]
    use_llm: bool,

    /// LLM backend to use
    #[arg(long, value_enum)]
    llm_provider: Option<ProviderArg>,

    /// Minimum messages for a theme to be significant
    #[arg(long)]
    min_cluster_size: Option<usize>,

    /// Minimum percentage of messages for significance
    #[arg(long = "min-percentage")]
    min_percentage: Option<f64>,

    /// Minimum confidence score for proposals
    #[arg(long)]
    confidence_threshold: Option<f64>,

    /// Maximum number of proposals
    #[arg(long)]
    max_proposals: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            min_cluster_size: self.min_cluster_size,
            min_cluster_percentage: self.min_percentage,
            confidence_threshold: self.confidence_threshold,
            max_proposals: self.max_proposals,
            use_llm: self.use_llm,
            llm_provider: self.llm_provider.map(Into::into),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = run(cli).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    info!("Starting intent expansion pipeline");

    let mut config = CliConfig::load(cli.config.as_deref())?;
    config.apply(&cli.overrides());
    let pipeline = config.build_pipeline()?;

    let data = input::load_input(&cli.input_file)?;
    let report = pipeline.run(&data.messages, &data.hierarchy).await?;

    let paths = ReportPaths::from_output(&cli.output);
    output::write_reports(&report, &paths)?;
    output::print_summary(&report, &paths);
    Ok(())
}
