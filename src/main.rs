//! askdoc CLI
//!
//! Commands:
//!   serve   - Start the HTTP API
//!   ask     - Answer a single question from the terminal
//!   history - Print recorded question/answer pairs
//!   info    - Show configuration and document status

use anyhow::Result;
use askdoc::{Config, HistoryStore, OpenAIProvider, QaService, Synthesizer};
use askdoc::service::load_chunks;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "askdoc")]
#[command(about = "Ask questions about a PDF document")]
#[command(version)]
struct Cli {
    /// Optional config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the source PDF (overrides config and ASKDOC_PDF)
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// Directory for the history database
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8005")]
        port: u16,
    },

    /// Answer a single question
    Ask {
        /// The question to answer
        question: String,
    },

    /// Print recorded questions and answers, most recent first
    History,

    /// Show configuration and document status
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "askdoc=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(pdf) = &cli.pdf {
        config.pdf_path = pdf.to_string_lossy().to_string();
    }

    match cli.command {
        Commands::Serve { port } => {
            let service = Arc::new(build_service(&config, &cli.data_dir)?);
            askdoc::server::run_server(service, port).await?;
        }

        Commands::Ask { question } => {
            let service = build_service(&config, &cli.data_dir)?;
            let answer = service.answer(&question).await?;
            println!("{}", answer);
        }

        Commands::History => {
            let history = open_history(&cli.data_dir)?;
            let pairs = history.list()?;

            if pairs.is_empty() {
                println!("No history yet. Use 'askdoc ask' to ask a question.");
            } else {
                for pair in pairs {
                    println!("Q: {}", pair.question);
                    println!("A: {}\n", pair.answer);
                }
            }
        }

        Commands::Info => {
            let chunks = load_chunks(&config);
            let history = open_history(&cli.data_dir)?;

            println!("PDF:         {}", config.pdf_path);
            println!("Chunks:      {}", chunks.len());
            println!(
                "Chunking:    {} chars, {} overlap",
                config.chunking.chunk_size(),
                config.chunking.overlap()
            );
            println!("Model:       {}", config.model);
            println!("Top-K:       {}", config.top_k);
            println!(
                "API key:     {}",
                if Config::api_key().is_some() { "set" } else { "not set" }
            );
            println!("History:     {} entries", history.count()?);
        }
    }

    Ok(())
}

fn build_service(config: &Config, data_dir: &std::path::Path) -> Result<QaService> {
    let chunks = load_chunks(config);
    if chunks.is_empty() {
        tracing::warn!(
            "No chunks loaded from {}; questions will get the sentinel answer",
            config.pdf_path
        );
    } else {
        tracing::info!("Loaded {} chunks from {}", chunks.len(), config.pdf_path);
    }

    let synthesizer = Config::api_key()
        .map(|key| Synthesizer::new(Arc::new(OpenAIProvider::new(key, config.model.clone()))));
    match &synthesizer {
        Some(s) => tracing::info!("Answer synthesis via {}", s.model()),
        None => tracing::warn!("OPENAI_API_KEY is not set; answers will be degraded"),
    }

    let history = Arc::new(open_history(data_dir)?);

    Ok(QaService::new(chunks, config.top_k, synthesizer, history))
}

fn open_history(data_dir: &std::path::Path) -> Result<HistoryStore> {
    std::fs::create_dir_all(data_dir)?;
    HistoryStore::open(&data_dir.join("history.db"))
}
