use anyhow::{Context, Result};
use clap::Parser;
use college_crossref::config::Settings;
use college_crossref::ScoreMode;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "college-crossref",
    about = "Group medical, pharmacy and MFA programs that sit close together"
)]
struct Args {
    /// Configuration file (defaults to config/default + config/local)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the institutions CSV
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path of the text report
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a JSON summary to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Ranking score: "literal" or "mean"
    #[arg(long)]
    score_mode: Option<ScoreMode>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let args = Args::parse();

    // Load configuration
    let mut settings = match &args.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("Failed to load configuration")?;

    if let Some(input) = args.input {
        settings.input.path = input;
    }
    if let Some(output) = args.output {
        settings.output.report_path = output;
    }
    if let Some(summary) = args.summary {
        settings.output.summary_path = Some(summary);
    }
    if let Some(score_mode) = args.score_mode {
        settings.matching.score_mode = score_mode;
    }

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level))
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    info!("Starting college cross-referencing...");
    info!(
        "Tiers {:?} {}, score mode {:?}",
        settings.matching.tiers, settings.matching.unit_label, settings.matching.score_mode
    );

    let outcome = college_crossref::run(&settings).with_context(|| {
        format!(
            "Failed to generate report from {}",
            settings.input.path.display()
        )
    })?;

    let total: usize = outcome.tier_counts.iter().map(|(_, count)| count).sum();
    info!(
        "Done: {} triplets across {} tiers from {} institutions",
        total,
        outcome.tier_counts.len(),
        outcome.load_stats.medical + outcome.load_stats.pharmacy + outcome.load_stats.mfa
    );

    Ok(())
}
