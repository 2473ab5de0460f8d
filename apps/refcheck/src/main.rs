use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use refcheck::config::Config;
use refcheck::document::{DocumentTextExtractor, SourceFetcher};
use refcheck::llm_client::{self, LlmClient};
use refcheck::questions::{PgQuestionLookup, QuestionLookup, StaticQuestionLookup};
use refcheck::{validate, Pipeline};

#[derive(Parser, Debug)]
#[command(
    name = "refcheck",
    about = "Extract applicant details and references from resumes",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the extraction pipeline on a resume URL or file path
    Run {
        /// http(s) URL or local path of the resume
        source: String,
        /// Role the applicant is being checked for
        #[arg(long)]
        role: String,
        /// Organization running the reference check
        #[arg(long)]
        organization: String,
        /// Print the merged AI + fallback record instead of the raw run result
        #[arg(long)]
        merge: bool,
    },
    /// Validate free-text reference lines, one per line
    Validate {
        /// File to read; stdin when omitted
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting refcheck v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Run {
            source,
            role,
            organization,
            merge,
        } => run(&config, &source, &role, &organization, merge).await,
        Command::Validate { file } => validate_lines(file),
    }
}

async fn run(config: &Config, source: &str, role: &str, organization: &str, merge: bool) -> Result<()> {
    let settings = config.pipeline_settings();

    let llm = LlmClient::new(config.require_anthropic_api_key()?.to_string())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let fetcher = SourceFetcher::new(settings.fetch_timeout)?;
    let questions = build_question_lookup(config).await;

    let pipeline = Pipeline::new(
        Arc::new(fetcher),
        Arc::new(DocumentTextExtractor),
        Arc::new(llm),
        questions,
        settings,
    );

    let output = if merge {
        let processed = pipeline.process(source, role, organization).await;
        serde_json::to_string_pretty(&processed)?
    } else {
        let result = pipeline.run(source, role, organization).await;
        serde_json::to_string_pretty(&result)?
    };
    println!("{output}");
    Ok(())
}

/// PostgreSQL when configured and reachable; otherwise an empty table, which
/// makes every run use the generic questions.
async fn build_question_lookup(config: &Config) -> Arc<dyn QuestionLookup> {
    let Some(url) = config.database_url.as_deref() else {
        info!("DATABASE_URL not set; using generic questions");
        return Arc::new(StaticQuestionLookup::new());
    };
    match PgQuestionLookup::connect(url).await {
        Ok(lookup) => Arc::new(lookup),
        Err(e) => {
            warn!("Question database unavailable ({e}); using generic questions");
            Arc::new(StaticQuestionLookup::new())
        }
    }
}

fn validate_lines(file: Option<PathBuf>) -> Result<()> {
    let input = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let lines: Vec<&str> = input.lines().collect();
    let report = validate(&lines);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
