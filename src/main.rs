//! Main entry point for Popup Translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use popup_translator::cli::commands::{self, Commands};
use popup_translator::TranslatorConfig;

/// Popup Translator - quick word lookup with Google Translate, DeepL and Mazii
#[derive(Parser, Debug)]
#[command(name = "popup-translator", version, about, long_about = None)]
struct Args {
    /// Configuration file (JSON, YAML or TOML); environment variables otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}={}", env!("CARGO_CRATE_NAME"), log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &args.config {
        Some(path) => TranslatorConfig::from_file(path)?,
        None => TranslatorConfig::from_env()?,
    };

    // Execute command
    match args.command {
        Commands::Translate {
            word,
            source_lang,
            target_lang,
            api,
            json,
        } => {
            commands::handle_translate(config, word, source_lang, target_lang, api, json).await?;
        }
        Commands::Repl {
            source_lang,
            target_lang,
            api,
        } => {
            commands::handle_repl(config, source_lang, target_lang, api).await?;
        }
        Commands::Serve { host, port } => {
            commands::handle_serve(config, host, port).await?;
        }
    }

    Ok(())
}
