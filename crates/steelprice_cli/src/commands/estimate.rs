//! Estimate command - Console prompt front end.

use std::io;

use anyhow::Result;
use clap::Args;
use tracing::info;

use steelprice_core::PriceSheet;

use crate::prompt::{ConsolePrompt, PromptOutcome};

#[derive(Args)]
pub struct EstimateArgs {
    /// Also print the detailed cost breakdown
    #[arg(short, long)]
    breakdown: bool,
}

pub fn execute(args: EstimateArgs, sheet: &PriceSheet) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    let outcome = ConsolePrompt::new(sheet, stdin.lock(), stdout.lock())
        .with_breakdown(args.breakdown)
        .run()?;

    // An over-100% composition is reported to the user, not treated as a failure.
    match outcome {
        PromptOutcome::Quoted(quote) => info!(
            "Estimated {}: {:.2} raw cost per kg",
            quote.grade_name, quote.estimate.raw_cost_per_kg
        ),
        PromptOutcome::OverLimit { total_percent } => {
            info!("Composition rejected at {:.2}%", total_percent)
        }
    }

    Ok(())
}
