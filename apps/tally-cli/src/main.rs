//! # Tally CLI
//!
//! Evaluates a purchase or sales document stored as JSON.
//!
//! ## Usage
//! ```bash
//! # Live totals of a draft
//! tally order.json
//!
//! # Lock totals at 2 places, record a payment, print JSON
//! tally order.json --finalize --pay 1000 --format json
//!
//! # Verbose logs
//! RUST_LOG=debug tally order.json
//! ```
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  args ──► TallyConfig::load ──► read order JSON ──► OrderDocument      │
//! │                                                          │              │
//! │              [--finalize] ──► finalize(precision) ◄──────┘              │
//! │              [--pay/--return] ──► record_payment / record_return        │
//! │                                                          │              │
//! │                                table | JSON ──► stdout ◄┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;
mod config;
mod report;

use std::process::ExitCode;

use anyhow::Context;
use tally_core::OrderDocument;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, EvaluateArgs, USAGE};
use crate::config::{OutputFormat, TallyConfig};
use crate::report::{render_table, EvaluationReport};

fn main() -> ExitCode {
    init_tracing();

    let command = match Command::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match command {
        Command::Help => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Command::Evaluate(args) => match run(args) {
            Ok(output) => {
                println!("{output}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {e:#}");
                ExitCode::FAILURE
            }
        },
    }
}

/// Loads, evaluates and renders one document.
fn run(args: EvaluateArgs) -> anyhow::Result<String> {
    let mut config = TallyConfig::load(&args.config_path)
        .with_context(|| format!("loading config from {}", args.config_path.display()))?;

    if let Some(precision) = args.precision {
        config.precision = precision;
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    config.validate()?;

    let raw = std::fs::read_to_string(&args.order_path)
        .with_context(|| format!("reading {}", args.order_path.display()))?;
    let mut document = OrderDocument::from_json(&raw)
        .with_context(|| format!("parsing {}", args.order_path.display()))?;

    info!(
        reference = %document.reference,
        kind = %document.kind,
        lines = document.lines.len(),
        "Document loaded"
    );

    if args.finalize {
        document.finalize(config.precision)?;
    }
    for amount in &args.payments {
        document.record_payment(*amount)?;
    }
    for amount in &args.returns {
        document.record_return(*amount)?;
    }

    let output = match config.format {
        OutputFormat::Table => render_table(&document, &config),
        OutputFormat::Json => EvaluationReport::new(&document, config.precision).to_json()?,
    };
    Ok(output)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tally_core=trace` - Trace the core crate only
/// - Default: WARN, so stdout/stderr stay clean for piping
///
/// Logs go to stderr; stdout carries only the rendered document.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
