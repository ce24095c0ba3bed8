//! Line-by-line console prompt.
//!
//! Asks for a grade name, a category number and one percentage per element,
//! re-prompting on invalid answers, then prints a report. Generic over the
//! reader and writer so it runs against stdin/stdout or in-memory buffers.

use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use tracing::debug;

use steelprice_core::{
    format, parse_percent, Composition, PriceCalculator, PriceSheet, PricingError, Quote,
};

/// How a prompt session ended.
#[derive(Debug)]
pub enum PromptOutcome {
    /// The composition was priced and the report printed
    Quoted(Quote),
    /// The composition exceeded 100%; the error was printed instead of a report
    OverLimit { total_percent: f64 },
}

pub struct ConsolePrompt<'a, R, W> {
    sheet: &'a PriceSheet,
    input: R,
    output: W,
    show_breakdown: bool,
}

impl<'a, R: BufRead, W: Write> ConsolePrompt<'a, R, W> {
    pub fn new(sheet: &'a PriceSheet, input: R, output: W) -> Self {
        Self {
            sheet,
            input,
            output,
            show_breakdown: false,
        }
    }

    pub fn with_breakdown(mut self, show: bool) -> Self {
        self.show_breakdown = show;
        self
    }

    /// Run one full prompt session.
    pub fn run(&mut self) -> Result<PromptOutcome> {
        let sheet = self.sheet;
        writeln!(self.output, "🏭 Steel Retail Price Estimator")?;
        writeln!(self.output)?;

        let grade_name = self.ask("Steel grade name (e.g. 1.2714): ")?;

        writeln!(self.output)?;
        writeln!(self.output, "Steel categories:")?;
        for (i, category) in sheet.categories().iter().enumerate() {
            writeln!(self.output, "  {}. {} ({})", i + 1, category.name, category.band)?;
        }
        let category_number = self.ask_category()?;
        let category = sheet.category_by_number(category_number)?;

        writeln!(self.output)?;
        writeln!(
            self.output,
            "Chemical composition in % (blank = 0, iron is calculated automatically):"
        )?;
        let mut composition = Composition::new();
        for element in sheet.elements() {
            let label = element.label();
            let percent = self.ask_percent(&label)?;
            composition.set(label, percent);
        }

        let calculator = PriceCalculator::new(sheet);
        let estimate = match calculator.compute(&composition, &category.band) {
            Ok(estimate) => estimate,
            Err(PricingError::InvalidComposition(reason)) => {
                let total_percent = composition.total_percent();
                debug!("Composition rejected: {}", reason);
                writeln!(self.output)?;
                writeln!(
                    self.output,
                    "⚠️  Total percentage is {}! (Must be ≤ 100)",
                    format::percent(total_percent)
                )?;
                return Ok(PromptOutcome::OverLimit { total_percent });
            }
            Err(e) => return Err(e.into()),
        };

        let quote = Quote::new(&grade_name, category, sheet, estimate);
        writeln!(self.output)?;
        write!(self.output, "{}", quote.render_text())?;
        if self.show_breakdown {
            writeln!(self.output)?;
            write!(self.output, "{}", quote.render_breakdown())?;
        }
        self.output.flush()?;

        Ok(PromptOutcome::Quoted(quote))
    }

    /// Ask until a valid 1-based category number is given.
    fn ask_category(&mut self) -> Result<usize> {
        let count = self.sheet.categories().len();
        loop {
            let answer = self.ask(&format!("Select category [1-{}]: ", count))?;
            let selection = answer
                .trim()
                .parse::<usize>()
                .map_err(|_| {
                    PricingError::InvalidCategorySelection(format!("'{}' is not a number", answer))
                })
                .and_then(|n| self.sheet.category_by_number(n).map(|_| n));

            match selection {
                Ok(n) => return Ok(n),
                Err(e) => {
                    writeln!(self.output, "  {}. Enter a number between 1 and {}.", e, count)?
                }
            }
        }
    }

    /// Ask until a valid percentage (blank = 0) is given.
    fn ask_percent(&mut self, label: &str) -> Result<f64> {
        loop {
            let answer = self.ask(&format!("  {:<18}: ", label))?;
            match parse_percent(&answer) {
                Ok(value) if value <= 100.0 => return Ok(value),
                Ok(value) => writeln!(
                    self.output,
                    "    {} is above 100. Please try again.",
                    value
                )?,
                Err(e) => writeln!(self.output, "    {}. Please try again.", e)?,
            }
        }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("Input closed before the estimate was complete");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
