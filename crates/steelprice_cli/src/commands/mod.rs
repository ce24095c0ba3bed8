//! CLI command definitions.
//!
//! Each subcommand is a front end over the same pricing calculator.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod estimate;
pub mod form;
pub mod quote;
pub mod tables;

/// steelprice - Steel grade retail price estimator
#[derive(Parser)]
#[command(name = "steelprice")]
#[command(version, about = "steelprice - Steel grade retail price estimator")]
#[command(long_about = r#"
steelprice estimates the raw material cost and retail price range of a steel
grade from its chemical composition. Iron is the balance up to 100%.

COMMANDS:
  estimate  → Answer prompts line by line and print a report
  form      → Interactive form with live results and a cost chart
  quote     → Price a grade from command-line flags (text or JSON)
  tables    → Show element prices and category multipliers

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
  4 - Price sheet error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Price sheet override (.toml, .yaml or .yml)
    #[arg(short, long, global = true, env = "STEELPRICE_PRICES")]
    pub prices: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Prompt for grade, category and composition, then print a report
    Estimate(estimate::EstimateArgs),

    /// Open the interactive estimator form
    Form(form::FormArgs),

    /// Price a grade given on the command line
    Quote(quote::QuoteArgs),

    /// List element prices and category multipliers
    Tables(tables::TablesArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_quote() {
        let cli = Cli::try_parse_from([
            "steelprice",
            "quote",
            "--category",
            "2",
            "-e",
            "Cr=18",
            "-e",
            "Ni=8",
            "--json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Quote(_)));
    }

    #[test]
    fn test_global_prices_flag() {
        let cli =
            Cli::try_parse_from(["steelprice", "tables", "--prices", "sheet.toml"]).unwrap();
        assert_eq!(cli.prices, Some(PathBuf::from("sheet.toml")));
    }
}
