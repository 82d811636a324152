use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use scribeflow::{
    load_transcript, run_minutes, run_question, AzureOpenAiClient, AzureOpenAiConfig,
    DEFAULT_QUESTION, SAMPLE_TRANSCRIPT,
};

#[derive(Parser)]
#[command(name = "scribeflow")]
#[command(author, version, about = "Sequential LLM pipelines for meeting minutes and question enrichment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn a meeting transcript into formatted minutes
    Minutes {
        /// Input transcript file (UTF-8 text); omit to use the embedded sample
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Also write the minutes to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Answer, classify, and tag a single question
    Ask {
        /// Question text; omit to use the built-in sample question
        #[arg(short, long)]
        question: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Minutes {
            input,
            output,
            verbose,
        } => {
            setup_logging(verbose);
            generate_minutes(input, output).await
        }
        Commands::Ask { question, verbose } => {
            setup_logging(verbose);
            answer_question(question).await
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn generate_minutes(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let transcript = match input {
        Some(path) => {
            info!("Loading transcript from {:?}", path);
            load_transcript(&path)?
        }
        None => {
            info!("No input file given, using embedded sample transcript");
            SAMPLE_TRANSCRIPT.to_string()
        }
    };

    let config = AzureOpenAiConfig::from_env()?;
    let client = AzureOpenAiClient::new(config)?;

    let record = run_minutes(&client, transcript).await?;

    info!(
        "Extracted {} attendees, {} key points, {} action items",
        record.attendees.len(),
        record.key_points.len(),
        record.action_items.len()
    );

    if let Some(path) = output {
        std::fs::write(&path, &record.minutes)
            .with_context(|| format!("Failed to write minutes: {:?}", path))?;
        info!("Minutes written to {:?}", path);
    }

    println!("{}", record.minutes);

    Ok(())
}

async fn answer_question(question: Option<String>) -> Result<()> {
    let question = question.unwrap_or_else(|| DEFAULT_QUESTION.to_string());

    let config = AzureOpenAiConfig::from_env()?;
    let client = AzureOpenAiClient::new(config)?;

    let record = run_question(&client, question).await?;

    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}
