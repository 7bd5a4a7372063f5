//! deckgen CLI
//!
//! Generates one slide deck and writes the presentation JSON.
//!
//! Usage:
//!   cargo run --bin deckgen -- --topic "edge computing" --audience executives
//!
//! Examples:
//!   # Local generation only, reproducible chart choices
//!   cargo run --bin deckgen -- --topic "supply chain resilience" --offline --seed 7
//!
//!   # Options from a file, overridden on the command line
//!   cargo run --bin deckgen -- --settings deck.yaml --max-slides 8 --output deck.json
//!
//! Remote generation is attempted when GEMINI_API_KEY is set (a `.env` file is
//! read if present). Logs go to stderr, controlled by RUST_LOG.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::watch;

use deckgen::{
    Audience, DeckGenerator, PresentationOptions, SettingsResolver, Tone, TEMPLATES,
};

/// Slide-deck content generator
#[derive(Parser, Debug)]
#[command(name = "deckgen")]
#[command(about = "Generate a structured slide deck as JSON")]
struct Args {
    /// Presentation topic
    #[arg(long, short = 't')]
    topic: Option<String>,

    /// Target audience (executives, managers, clients, technical, students,
    /// general, investors, stakeholders, "team members")
    #[arg(long, short = 'a')]
    audience: Option<String>,

    /// Presentation tone (formal, casual, persuasive, informative, ...)
    #[arg(long)]
    tone: Option<String>,

    /// Template key (see --list-templates)
    #[arg(long)]
    template: Option<String>,

    /// Slide budget
    #[arg(long, short = 'm')]
    max_slides: Option<u32>,

    /// Omit speaker notes
    #[arg(long)]
    no_notes: bool,

    /// Extra requirements passed to the remote service
    #[arg(long)]
    additional_info: Option<String>,

    /// YAML or JSON settings file; command-line values take precedence
    #[arg(long, short = 's')]
    settings: Option<PathBuf>,

    /// Write the presentation here instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Skip the remote service even if credentials are configured
    #[arg(long)]
    offline: bool,

    /// Seed for reproducible chart-type choices
    #[arg(long, env = "DECKGEN_SEED")]
    seed: Option<u64>,

    /// List available templates and exit
    #[arg(long)]
    list_templates: bool,
}

impl Args {
    fn overrides(&self) -> PresentationOptions {
        PresentationOptions {
            topic: self.topic.clone(),
            audience: self.audience.clone().map(Audience::from),
            tone: self.tone.clone().map(Tone::from),
            template: self.template.clone(),
            max_slides: self.max_slides,
            include_notes: self.no_notes.then_some(false),
            additional_info: self.additional_info.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Logs on stderr keep stdout clean for the JSON document
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list_templates {
        for template in TEMPLATES.iter() {
            println!(
                "{:<10} {:<22} {} / {}",
                template.key, template.name, template.heading_font, template.body_font
            );
        }
        return Ok(());
    }

    let base = match &args.settings {
        Some(path) => SettingsResolver::load_options(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => PresentationOptions::default(),
    };
    let settings = SettingsResolver::resolve(base.merge(args.overrides()))
        .context("Invalid presentation settings")?;

    let mut generator = if args.offline {
        DeckGenerator::local_only()
    } else {
        DeckGenerator::from_env()
    };
    if let Some(seed) = args.seed {
        generator = generator.with_seed(seed);
    }

    // Ctrl-C abandons the remote call; the local deck is still written
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    let presentation = generator
        .generate_with_shutdown(&settings, shutdown_rx)
        .await;

    let json = serde_json::to_string_pretty(&presentation)
        .context("Failed to serialize presentation")?;

    match &args.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Wrote {} slides ({}) to {}",
                presentation.slides.len(),
                presentation.metadata.generator,
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
