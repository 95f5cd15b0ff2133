//! ADCP Deployment Predictor
//!
//! Usage:
//!   adcp-predict --subsystem 3 --days 90 --cei 600
//!   adcp-predict --scenario deployment.json --burst-samples 600 --burst-interval 3600 --json

use adcp_prediction::{PredictionInput, PredictionReport};
use anyhow::{Context, Result};
use clap::Parser;
use predictor_cli::{load_scenario, render_text, Overrides, PredictionEnvelope};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "adcp-predict",
    about = "Predict power, range, precision and storage of an ADCP deployment"
)]
struct Args {
    /// Scenario JSON file; missing fields take defaults
    #[arg(long)]
    scenario: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,

    /// Emit JSON instead of the summary table
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so --json output stays clean
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let input = match &args.scenario {
        Some(path) => load_scenario(path)
            .with_context(|| format!("Failed to load scenario {}", path.display()))?,
        None => PredictionInput::default(),
    };
    let input = args
        .overrides
        .apply(input)
        .context("Failed to apply command-line overrides")?;

    let report = PredictionReport::compute(&input).context("Prediction failed")?;
    info!(
        "Predicted {:.1} Wh over {} days ({:.2} batteries)",
        report.power_wh, input.deployment_duration_days, report.batteries
    );

    if args.json {
        let envelope = PredictionEnvelope::new(input, report);
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        println!("{}", render_text(&input, &report));
    }

    Ok(())
}
