//! One-shot risk check without the TUI.
//!
//! Reads a metrics JSON object from a file or stdin, runs the full
//! check and prints the assessment as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin assess -- [--model <dir>] [--require-digest] [metrics.json]
//! ```

use std::io::Read;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use vitalis::adapters::model::{self, LogisticModel};
use vitalis::application::AssessmentService;
use vitalis::config::Config;
use vitalis::HealthMetrics;

const USAGE: &str = "Usage: assess [--model <dir>] [--require-digest] [metrics.json]";

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays pure JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::from_env();
    let mut input: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--model" => {
                let p = args.next().unwrap_or_default();
                if p.is_empty() {
                    eprintln!("{USAGE}");
                    std::process::exit(2);
                }
                config.model_path = PathBuf::from(p);
            }
            "--require-digest" => config.require_model_digest = true,
            "-h" | "--help" => {
                println!(
                    "{USAGE}\n\nReads health metrics as JSON from the given file (or stdin) and prints the assessment. The model directory defaults to $VITALIS_MODEL_PATH or ./models."
                );
                return Ok(());
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown arg: {other}\n{USAGE}");
                std::process::exit(2);
            }
            other => {
                if input.is_some() {
                    eprintln!("Only one metrics file may be given\n{USAGE}");
                    std::process::exit(2);
                }
                input = Some(PathBuf::from(other));
            }
        }
    }

    let raw = match &input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let metrics: HealthMetrics =
        serde_json::from_str(&raw).context("Metrics JSON does not match the expected fields")?;

    let loaded = LogisticModel::load(&config.model_path, config.require_model_digest)
        .map_err(|e| anyhow!("Failed to load model from {:?}: {}", config.model_path, e))?;
    let classifier = model::init_global(loaded)?;
    tracing::info!(
        "Risk model ready (sha256 {}, threshold {:.2})",
        classifier.digest(),
        classifier.threshold()
    );

    let service = AssessmentService::new(classifier);
    let assessment = service.assess(metrics)?;

    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}
