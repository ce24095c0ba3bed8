//! Quotes and their text/JSON renderings.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculator::PriceEstimate;
use crate::category::Category;
use crate::element::Currency;
use crate::error::PricingResult;
use crate::format;
use crate::sheet::PriceSheet;

/// Name shown when the user leaves the grade name blank.
pub const DEFAULT_GRADE_NAME: &str = "Custom Grade";

const RULE_WIDTH: usize = 52;

/// A priced steel grade, ready for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Steel grade name (e.g., "1.2714")
    pub grade_name: String,
    /// Category the multiplier band came from
    pub category: String,
    /// Display currency
    pub currency: Currency,
    /// Date label of the prices used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<String>,
    /// The computed estimate
    pub estimate: PriceEstimate,
    /// When this quote was produced
    pub generated_at: DateTime<Utc>,
}

impl Quote {
    pub fn new(
        grade_name: &str,
        category: &Category,
        sheet: &PriceSheet,
        estimate: PriceEstimate,
    ) -> Self {
        Self {
            grade_name: display_grade_name(grade_name),
            category: category.name.clone(),
            currency: sheet.currency(),
            as_of: sheet.as_of().map(str::to_string),
            estimate,
            generated_at: Utc::now(),
        }
    }

    /// Console report: grade, category, raw cost, multiplier and retail range.
    pub fn render_text(&self) -> String {
        let e = &self.estimate;
        let c = self.currency;
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        let mut out = String::new();
        let _ = writeln!(out, "{}", heavy);
        let _ = writeln!(out, " PRICE ESTIMATE: {}", self.grade_name);
        let _ = writeln!(out, "{}", heavy);
        let _ = writeln!(out, " {:<18}{}", "Category:", self.category);
        let _ = writeln!(out, " {:<18}{}", "Iron balance:", format::percent(e.iron_percent));
        let _ = writeln!(
            out,
            " {:<18}{} /kg",
            "Raw melt cost:",
            format::money(c, e.raw_cost_per_kg)
        );
        let _ = writeln!(out, " {:<18}{}", "Multiplier:", e.band);
        let _ = writeln!(out, "{}", light);
        let _ = writeln!(
            out,
            " {:<18}{} - {} /kg",
            "Retail price:",
            format::money(c, e.retail_min_per_kg),
            format::money(c, e.retail_max_per_kg)
        );
        let _ = writeln!(
            out,
            " {:<18}{} - {}",
            "Per tonne:",
            format::money_whole(c, e.retail_min_per_tonne()),
            format::money_whole(c, e.retail_max_per_tonne())
        );
        if let Some(as_of) = &self.as_of {
            let _ = writeln!(out, " {:<18}{}", "Prices as of:", as_of);
        }
        let _ = writeln!(out, "{}", heavy);
        out
    }

    /// Detailed cost breakdown table, one row per constituent.
    pub fn render_breakdown(&self) -> String {
        let mut out = String::new();
        let cost_header = format!("Cost ({}/kg)", self.currency);
        let _ = writeln!(out, " {:<20}{:>10}{:>16}", "Element", "Percent", cost_header);
        let _ = writeln!(out, " {}", "-".repeat(RULE_WIDTH - 6));
        for item in &self.estimate.breakdown {
            let _ = writeln!(
                out,
                " {:<20}{:>10}{:>16}",
                item.element,
                format::percent(item.percent),
                format!("{:.4}", item.cost_per_kg)
            );
        }
        out
    }

    pub fn to_json(&self) -> PricingResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Blank names become [`DEFAULT_GRADE_NAME`].
pub fn display_grade_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        DEFAULT_GRADE_NAME.to_string()
    } else {
        name.to_string()
    }
}

/// Plain-text listing of the element prices and categories of a sheet.
pub fn render_tables(sheet: &PriceSheet) -> String {
    let c = sheet.currency();
    let mut out = String::new();

    match sheet.as_of() {
        Some(as_of) => {
            let _ = writeln!(out, "Element prices (per kg, as of {}):", as_of);
        }
        None => {
            let _ = writeln!(out, "Element prices (per kg):");
        }
    }
    for element in sheet.elements() {
        let _ = writeln!(
            out,
            "  {:<20}{:>10}",
            element.label(),
            format::money(c, element.price_per_kg)
        );
    }
    let _ = writeln!(
        out,
        "  {:<20}{:>10}",
        "Iron (base)",
        format::money(c, sheet.iron_price_per_kg())
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Categories (retail multiplier):");
    for (i, category) in sheet.categories().iter().enumerate() {
        let _ = writeln!(out, "  {}. {:<32}{}", i + 1, category.name, category.band);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::PriceCalculator;
    use crate::composition::Composition;

    fn stainless_quote(name: &str) -> Quote {
        let sheet = PriceSheet::default();
        let category = sheet.category("2").unwrap();
        let composition = Composition::new().with("Cr", 18.0).with("Ni", 8.0);
        let estimate = PriceCalculator::new(&sheet)
            .compute(&composition, &category.band)
            .unwrap();
        Quote::new(name, category, &sheet, estimate)
    }

    #[test]
    fn test_render_text() {
        let text = stainless_quote("1.4301").render_text();
        assert!(text.contains("PRICE ESTIMATE: 1.4301"));
        assert!(text.contains("Stainless Steel"));
        assert!(text.contains("74.00%"));
        assert!(text.contains("$2.29 /kg"));
        assert!(text.contains("2.5x - 3.5x"));
        assert!(text.contains("$5.73 - $8.02 /kg"));
        assert!(text.contains("$5,728 - $8,019"));
        assert!(text.contains("2026-02"));
    }

    #[test]
    fn test_blank_name_defaults() {
        let quote = stainless_quote("   ");
        assert_eq!(quote.grade_name, DEFAULT_GRADE_NAME);
    }

    #[test]
    fn test_render_breakdown() {
        let table = stainless_quote("1.4301").render_breakdown();
        let rows: Vec<&str> = table.lines().skip(2).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains("Chromium (Cr)"));
        assert!(rows[1].contains("1.3440"));
        assert!(rows[2].contains("Iron"));
        assert!(rows[2].contains("0.4070"));
    }

    #[test]
    fn test_to_json() {
        let json = stainless_quote("1.4301").to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["gradeName"], "1.4301");
        assert_eq!(value["currency"], "USD");
        assert_eq!(value["estimate"]["breakdown"][2]["element"], "Iron");
        assert!(value["generatedAt"].is_string());
    }

    #[test]
    fn test_render_tables() {
        let text = render_tables(&PriceSheet::default());
        assert!(text.contains("Niobium (Nb)"));
        assert!(text.contains("$45.00"));
        assert!(text.contains("Iron (base)"));
        assert!(text.contains("5. High Speed Steels (HSS)"));
        assert!(text.contains("6.0x - 9.0x"));
    }
}
