//! Command-line argument parsing.

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::config::OutputFormat;

pub const USAGE: &str = "\
Tally Order Evaluator

Usage: tally [OPTIONS] <ORDER_JSON>

Options:
  -f, --format <table|json>   Output format (default from config: table)
  -p, --precision <N>         Decimal places for display and finalize
      --finalize              Finalize the document before printing
      --pay <AMOUNT>          Record a payment (repeatable)
      --return <AMOUNT>       Record a return/refund (repeatable)
  -c, --config <PATH>         Config file (default: ./tally.toml, optional)
  -h, --help                  Show this help message";

/// Parsed invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Evaluate(EvaluateArgs),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluateArgs {
    pub order_path: PathBuf,
    pub config_path: PathBuf,
    pub format: Option<OutputFormat>,
    pub precision: Option<u32>,
    pub finalize: bool,
    pub payments: Vec<Decimal>,
    pub returns: Vec<Decimal>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CliError {
    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Invalid value for {flag}: {value}")]
    InvalidValue { flag: String, value: String },

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Missing order file")]
    MissingOrder,
}

impl Command {
    /// Parses arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Command, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();

        let mut order_path = None;
        let mut config_path = PathBuf::from("tally.toml");
        let mut format = None;
        let mut precision = None;
        let mut finalize = false;
        let mut payments = Vec::new();
        let mut returns = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--format" | "-f" => format = Some(parse_value(&arg, args.next())?),
                "--precision" | "-p" => precision = Some(parse_value(&arg, args.next())?),
                "--config" | "-c" => config_path = PathBuf::from(require(&arg, args.next())?),
                "--finalize" => finalize = true,
                "--pay" => payments.push(parse_value(&arg, args.next())?),
                "--return" => returns.push(parse_value(&arg, args.next())?),
                other if other.starts_with('-') => {
                    return Err(CliError::UnknownOption(other.to_string()))
                }
                _ => order_path = Some(PathBuf::from(arg)),
            }
        }

        Ok(Command::Evaluate(EvaluateArgs {
            order_path: order_path.ok_or(CliError::MissingOrder)?,
            config_path,
            format,
            precision,
            finalize,
            payments,
            returns,
        }))
    }
}

fn require(flag: &str, value: Option<String>) -> Result<String, CliError> {
    value.ok_or_else(|| CliError::MissingValue(flag.to_string()))
}

fn parse_value<T: FromStr>(flag: &str, value: Option<String>) -> Result<T, CliError> {
    let value = require(flag, value)?;
    value.parse().map_err(|_| CliError::InvalidValue {
        flag: flag.to_string(),
        value,
    })
}
