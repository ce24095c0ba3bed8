//! Quote command - Price a grade from command-line flags.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use steelprice_core::{Composition, PriceCalculator, PriceSheet, PricingResult, Quote};

#[derive(Args)]
pub struct QuoteArgs {
    /// Category number or name (see `steelprice tables`)
    #[arg(short, long)]
    category: String,

    /// Element percentage as ELEMENT=PERCENT, e.g. Cr=18 (repeatable)
    #[arg(short, long = "element", value_name = "ELEMENT=PERCENT")]
    elements: Vec<String>,

    /// Steel grade name
    #[arg(short, long, default_value = "")]
    name: String,

    /// Also print the detailed cost breakdown
    #[arg(short, long)]
    breakdown: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn execute(args: QuoteArgs, sheet: &PriceSheet) -> Result<()> {
    let quote = build_quote(&args, sheet).context("Failed to price grade")?;
    info!(
        "Quoted {} ({}): {:.2} raw cost per kg",
        quote.grade_name, quote.category, quote.estimate.raw_cost_per_kg
    );

    if args.json {
        println!("{}", quote.to_json()?);
    } else {
        print!("{}", quote.render_text());
        if args.breakdown {
            println!();
            print!("{}", quote.render_breakdown());
        }
    }

    Ok(())
}

fn build_quote(args: &QuoteArgs, sheet: &PriceSheet) -> PricingResult<Quote> {
    let composition = args
        .elements
        .iter()
        .map(|entry| Composition::parse_entry(entry))
        .collect::<PricingResult<Composition>>()?;

    let category = sheet.category(&args.category)?;
    let estimate = PriceCalculator::new(sheet).compute(&composition, &category.band)?;
    Ok(Quote::new(&args.name, category, sheet, estimate))
}
