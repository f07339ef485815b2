use anyhow::Context;
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use fairgpt::models::{RetrievalHit, VerificationResult};
use fairgpt::pipeline::{
    DummyGenerator, DummySearch, Generator, LlmGenerator, SearchClient, SearchRequest,
    StoredArticleBias, TavilySearch, VerificationOrchestrator,
};
use fairgpt::Settings;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fairgpt", version, about = "Multi-tier news claim verification")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify a news query and print the verdict as JSON
    Verify {
        query: String,
        /// Exit non-zero instead of printing a fail-safe verdict
        #[arg(long)]
        strict: bool,
    },
    /// Print the JSON schema of the verdict
    Schema,
    /// Score stored articles (JSON lines of {title, summary_text}) for loaded language
    Score {
        /// Input file; stdin when omitted
        file: Option<PathBuf>,
    },
}

enum Search {
    Dummy(DummySearch),
    Tavily(TavilySearch),
}

#[async_trait]
impl SearchClient for Search {
    async fn search(&self, request: &SearchRequest) -> anyhow::Result<Vec<RetrievalHit>> {
        match self {
            Search::Dummy(s) => s.search(request).await,
            Search::Tavily(s) => s.search(request).await,
        }
    }
}

enum Model {
    Dummy(DummyGenerator),
    Llm(LlmGenerator),
}

#[async_trait]
impl Generator for Model {
    async fn generate(
        &self,
        system_instruction: &str,
        user_content: &str,
    ) -> anyhow::Result<String> {
        match self {
            Model::Dummy(g) => g.generate(system_instruction, user_content).await,
            Model::Llm(g) => g.generate(system_instruction, user_content).await,
        }
    }
}

#[derive(Deserialize)]
struct StoredArticle {
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary_text: String,
}

#[derive(Serialize)]
struct ArticleScore<'a> {
    title: &'a str,
    bias_score: f64,
    flagged: bool,
}

fn build_orchestrator(settings: &Settings) -> anyhow::Result<VerificationOrchestrator<Search, Model>> {
    let policy = Arc::new(settings.load_policy()?);

    let search = match settings.search_api_key.as_deref() {
        Some(key) => Search::Tavily(TavilySearch::new(key)?),
        None => {
            warn!("TAVILY_API_KEY not set, retrieval runs offline");
            Search::Dummy(DummySearch)
        }
    };
    if settings.llm_api_base.is_none() && !settings.model.starts_with("gpt") {
        warn!(model = %settings.model, "OPENAI_API_BASE not set, model may not exist on the default endpoint");
    }
    let model = match settings.llm_api_key.as_deref() {
        Some(key) => Model::Llm(LlmGenerator::new(
            key,
            &settings.model,
            settings.llm_api_base.as_deref(),
        )),
        None => {
            warn!("OPENAI_API_KEY not set, generation runs offline");
            Model::Dummy(DummyGenerator)
        }
    };

    Ok(VerificationOrchestrator::new(
        search,
        model,
        policy,
        settings.generation_timeout,
    ))
}

fn score_articles(reader: impl BufRead) -> anyhow::Result<()> {
    let scorer = StoredArticleBias::default();
    let mut scored = 0usize;
    let mut flagged = 0usize;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let article: StoredArticle = serde_json::from_str(&line)
            .with_context(|| format!("line {}: invalid article JSON", lineno + 1))?;
        let bias_score = scorer.score_article(&article.title, &article.summary_text);
        let is_flagged = StoredArticleBias::is_flagged(bias_score);
        scored += 1;
        if is_flagged {
            flagged += 1;
        }
        let out = ArticleScore {
            title: &article.title,
            bias_score,
            flagged: is_flagged,
        };
        println!("{}", serde_json::to_string(&out)?);
    }
    info!(scored, flagged, "bias scoring complete");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Verify { query, strict } => {
            let settings = Settings::from_env()?;
            let orchestrator = build_orchestrator(&settings)?;
            let result = if strict {
                orchestrator.try_verify(&query).await?
            } else {
                orchestrator.verify(&query).await
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Schema => {
            let schema = schemars::schema_for!(VerificationResult);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Command::Score { file } => match file {
            Some(path) => {
                let f = File::open(&path)
                    .with_context(|| format!("cannot open {}", path.display()))?;
                score_articles(BufReader::new(f))?;
            }
            None => score_articles(io::stdin().lock())?,
        },
    }
    Ok(())
}
