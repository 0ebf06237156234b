//! AgriBase gateway CLI
//!
//! Runs the HTTP gateway or calls individual operations from the shell.

use agribase_ai::config::{GatewayConfig, LlmConfig, DEFAULT_BIND, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use agribase_ai::districts::DEFAULT_LIMIT;
use agribase_ai::logging::{init_tracing, LogFormat};
use agribase_ai::server::{self, AppState};
use agribase_ai::{Advisor, CompletionOracle, DistrictDirectory, GuardPolicy, LlmClient, SqlGenerator};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// AgriBase AI gateway - guarded text-to-SQL and advisory answers
#[derive(Parser)]
#[command(name = "agribase")]
#[command(about = "LLM gateway for the AgriBase agricultural database", long_about = None)]
#[command(version)]
struct Cli {
    /// LLM API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Model name (gemini-*, claude-*, or OpenAI-compatible)
    #[arg(long, env = "AGRIBASE_MODEL", default_value = DEFAULT_MODEL, global = true)]
    model: String,

    /// Override the provider base URL
    #[arg(long, env = "AGRIBASE_LLM_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Oracle request timeout in seconds
    #[arg(long, env = "AGRIBASE_LLM_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    timeout_secs: u64,

    /// Guard policy for generated SQL: prefix, strict
    #[arg(long, env = "AGRIBASE_GUARD", default_value = "prefix", global = true)]
    guard: GuardPolicy,

    /// Log format: pretty, json
    #[arg(long, env = "AGRIBASE_LOG_FORMAT", default_value = "pretty", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway
    Serve {
        /// Address to bind
        #[arg(long, env = "AGRIBASE_BIND", default_value = DEFAULT_BIND)]
        bind: String,

        /// District names file (one per line or JSON array)
        #[arg(long, env = "AGRIBASE_DISTRICTS")]
        districts: Option<PathBuf>,
    },

    /// Generate a guarded SELECT for a question
    Sql {
        /// Question in natural language
        question: String,

        /// Schema summary text
        #[arg(long, conflicts_with = "schema_file")]
        schema: Option<String>,

        /// Read schema summary from file
        #[arg(long)]
        schema_file: Option<PathBuf>,
    },

    /// Ask the agricultural assistant
    Ask {
        /// Question in natural language
        question: String,
    },

    /// Answer a question from retrieved data
    Answer {
        /// Original question
        question: String,

        /// SQL that produced the data
        #[arg(long, default_value = "")]
        sql: String,

        /// Retrieved data file (text or JSON); stdin if omitted
        #[arg(long)]
        data_file: Option<PathBuf>,
    },

    /// Suggest district names
    Districts {
        /// Partial district name
        query: String,

        /// District names file
        #[arg(long, env = "AGRIBASE_DISTRICTS")]
        districts: PathBuf,

        /// Maximum suggestions
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match &cli.command {
        Commands::Serve { bind, districts } => {
            cmd_serve(&cli, bind, districts.as_deref()).await?;
        }
        Commands::Sql { question, schema, schema_file } => {
            let schema = match schema_file {
                Some(path) => std::fs::read_to_string(expand(path))?,
                None => schema.clone().unwrap_or_default(),
            };
            cmd_sql(&cli, question, &schema).await?;
        }
        Commands::Ask { question } => {
            cmd_ask(&cli, question).await?;
        }
        Commands::Answer { question, sql, data_file } => {
            let data = match data_file {
                Some(path) => std::fs::read_to_string(expand(path))?,
                None => std::io::read_to_string(std::io::stdin())?,
            };
            cmd_answer(&cli, question, sql, &data).await?;
        }
        Commands::Districts { query, districts, limit } => {
            cmd_districts(districts, query, *limit)?;
        }
    }

    Ok(())
}

/// Expand `~` in user-supplied paths.
fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).to_string())
}

/// Oracle settings from CLI flags (env fallbacks applied by clap).
fn llm_config(cli: &Cli) -> anyhow::Result<LlmConfig> {
    let api_key = cli
        .api_key
        .clone()
        .ok_or_else(|| anyhow::anyhow!("API key required: pass --api-key or set GEMINI_API_KEY"))?;

    Ok(LlmConfig {
        api_key,
        model: cli.model.clone(),
        base_url: cli.base_url.clone(),
        timeout_secs: cli.timeout_secs,
    })
}

/// Build the process-wide oracle from CLI settings.
fn build_oracle(cli: &Cli) -> anyhow::Result<Arc<dyn CompletionOracle>> {
    Ok(Arc::new(LlmClient::new(&llm_config(cli)?)?))
}

async fn cmd_serve(cli: &Cli, bind: &str, districts: Option<&Path>) -> anyhow::Result<()> {
    let config = GatewayConfig {
        llm: llm_config(cli)?,
        guard: cli.guard,
        districts_path: districts.map(expand),
        bind: bind.to_string(),
    };

    let state = AppState::from_config(&config)?;
    server::serve(&config.bind, state).await?;
    Ok(())
}

async fn cmd_sql(cli: &Cli, question: &str, schema: &str) -> anyhow::Result<()> {
    let generator = SqlGenerator::with_policy(build_oracle(cli)?, cli.guard);
    let result = generator.generate(question, schema).await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn cmd_ask(cli: &Cli, question: &str) -> anyhow::Result<()> {
    let advisor = Advisor::new(build_oracle(cli)?);
    let reply = advisor.ask(question).await?;

    println!("{}", reply.response);
    Ok(())
}

async fn cmd_answer(cli: &Cli, question: &str, sql: &str, data: &str) -> anyhow::Result<()> {
    let advisor = Advisor::new(build_oracle(cli)?);
    let reply = advisor.answer_with_context(question, sql, data).await?;

    println!("{}", reply.response);
    Ok(())
}

fn cmd_districts(path: &Path, query: &str, limit: usize) -> anyhow::Result<()> {
    let directory = DistrictDirectory::load(&expand(path))?;

    for name in directory.search(query, limit) {
        println!("{}", name);
    }
    Ok(())
}
