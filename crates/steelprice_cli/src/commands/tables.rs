//! Tables command - List element prices and categories.

use anyhow::Result;
use clap::Args;

use steelprice_core::{render_tables, PriceSheet};

#[derive(Args)]
pub struct TablesArgs {
    /// Output as JSON in the price sheet layout (save as .yaml to reuse with --prices)
    #[arg(long)]
    json: bool,
}

pub fn execute(args: TablesArgs, sheet: &PriceSheet) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(sheet)?);
    } else {
        print!("{}", render_tables(sheet));
    }
    Ok(())
}
