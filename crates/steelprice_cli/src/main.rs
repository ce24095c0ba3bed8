//! steelprice CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure
//! - 4: Price sheet (configuration) error

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use steelprice_core::{PriceSheet, PricingError};

mod commands;
mod form;
mod prompt;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const CONFIG_ERROR: u8 = 4;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let default_directive = if cli.verbose {
        "steelprice=debug"
    } else if cli.quiet {
        "steelprice=error"
    } else {
        "steelprice=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{}", default_directive)));
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    match run(cli) {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let sheet = match &cli.prices {
        Some(path) => {
            info!("Loading price sheet from {:?}", path);
            PriceSheet::load(path)
                .with_context(|| format!("Failed to load price sheet {}", path.display()))?
        }
        None => PriceSheet::default(),
    };

    match cli.command {
        Commands::Estimate(args) => commands::estimate::execute(args, &sheet),
        Commands::Form(args) => commands::form::execute(args, &sheet),
        Commands::Quote(args) => commands::quote::execute(args, &sheet),
        Commands::Tables(args) => commands::tables::execute(args, &sheet),
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(pricing) = e.chain().find_map(|c| c.downcast_ref::<PricingError>()) {
        return match pricing {
            PricingError::InvalidComposition(_) => ExitCodes::VALIDATION_FAILURE,
            PricingError::UnknownElement(_)
            | PricingError::UnknownCategory(_)
            | PricingError::InvalidCategorySelection(_)
            | PricingError::InvalidNumericInput(_) => ExitCodes::INVALID_ARGS,
            PricingError::InvalidMultiplier { .. }
            | PricingError::InvalidPriceSheet(_)
            | PricingError::Io(_)
            | PricingError::Yaml(_)
            | PricingError::Toml(_) => ExitCodes::CONFIG_ERROR,
            PricingError::Serialization(_) => ExitCodes::GENERAL_ERROR,
        };
    }

    let msg = e.to_string().to_lowercase();
    if msg.contains("argument") || msg.contains("option") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_pricing_errors() {
        let err = anyhow::Error::new(PricingError::InvalidComposition("110%".into()));
        assert_eq!(categorize_error(&err), ExitCodes::VALIDATION_FAILURE);

        let err = anyhow::Error::new(PricingError::UnknownElement("Xx".into()))
            .context("Failed to price grade");
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);

        let err = anyhow::Error::new(PricingError::InvalidPriceSheet("empty".into()))
            .context("Failed to load price sheet prices.toml");
        assert_eq!(categorize_error(&err), ExitCodes::CONFIG_ERROR);
    }

    #[test]
    fn test_categorize_other_errors() {
        let err = anyhow::anyhow!("Input closed before the estimate was complete");
        assert_eq!(categorize_error(&err), ExitCodes::GENERAL_ERROR);
    }
}
