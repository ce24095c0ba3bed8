//! Alloying elements and their unit prices.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};

/// Display label used for the iron balance in cost breakdowns.
pub const IRON_LABEL: &str = "Iron";

fn label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<name>[^()]+?)\s*\((?P<symbol>[A-Za-z]{1,3})\)$")
            .expect("element label pattern is valid")
    })
}

/// Supported currencies for price display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    USD,
    EUR,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::USD => write!(f, "$"),
            Currency::EUR => write!(f, "€"),
        }
    }
}

/// An alloying element with its market price per kilogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Element name (e.g., "Chromium")
    pub name: String,
    /// Chemical symbol (e.g., "Cr")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Unit price per kilogram
    pub price_per_kg: f64,
}

impl Element {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, price_per_kg: f64) -> Self {
        Self {
            name: name.into(),
            symbol: Some(symbol.into()),
            price_per_kg,
        }
    }

    /// Parse an element from a label such as `"Chromium (Cr)"`.
    ///
    /// A label without a parenthesised symbol is taken as the bare name.
    pub fn from_label(label: &str, price_per_kg: f64) -> PricingResult<Self> {
        let label = label.trim();
        if label.is_empty() {
            return Err(PricingError::InvalidPriceSheet(
                "element label must not be empty".to_string(),
            ));
        }

        match label_pattern().captures(label) {
            Some(caps) => Ok(Self {
                name: caps["name"].to_string(),
                symbol: Some(caps["symbol"].to_string()),
                price_per_kg,
            }),
            None if label.contains('(') || label.contains(')') => Err(
                PricingError::InvalidPriceSheet(format!("malformed element label: {}", label)),
            ),
            None => Ok(Self {
                name: label.to_string(),
                symbol: None,
                price_per_kg,
            }),
        }
    }

    /// Identifier used as the composition key, e.g. `"Chromium (Cr)"`.
    pub fn label(&self) -> String {
        match &self.symbol {
            Some(symbol) => format!("{} ({})", self.name, symbol),
            None => self.name.clone(),
        }
    }

    /// Check whether an identifier refers to this element.
    ///
    /// The full label must match exactly; the symbol and the name match
    /// case-insensitively.
    pub fn matches(&self, id: &str) -> bool {
        let id = id.trim();
        if id == self.label() || id.eq_ignore_ascii_case(&self.name) {
            return true;
        }
        self.symbol
            .as_deref()
            .is_some_and(|symbol| id.eq_ignore_ascii_case(symbol))
    }

    /// Cost contribution per kilogram of steel for the given percentage.
    pub fn contribution(&self, percent: f64) -> f64 {
        (percent / 100.0) * self.price_per_kg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        let element = Element::from_label("Chromium (Cr)", 3.0).unwrap();
        assert_eq!(element.name, "Chromium");
        assert_eq!(element.symbol.as_deref(), Some("Cr"));
        assert_eq!(element.label(), "Chromium (Cr)");
    }

    #[test]
    fn test_label_without_symbol() {
        let element = Element::from_label("Boron", 5.0).unwrap();
        assert_eq!(element.symbol, None);
        assert_eq!(element.label(), "Boron");
    }

    #[test]
    fn test_malformed_label() {
        assert!(Element::from_label("Chromium (Cr", 3.0).is_err());
        assert!(Element::from_label("   ", 3.0).is_err());
    }

    #[test]
    fn test_label_pattern_is_shared() {
        assert!(std::ptr::eq(label_pattern(), label_pattern()));
        for label in ["Chromium (Cr)", "Nickel (Ni)", "Boron"] {
            assert_eq!(Element::from_label(label, 1.0).unwrap().label(), label);
        }
    }

    #[test]
    fn test_matches() {
        let element = Element::new("Nickel", "Ni", 16.8);
        assert!(element.matches("Nickel (Ni)"));
        assert!(element.matches("ni"));
        assert!(element.matches("NICKEL"));
        assert!(!element.matches("nickel (ni)"));
        assert!(!element.matches("N"));
    }

    #[test]
    fn test_contribution() {
        let element = Element::new("Nickel", "Ni", 16.8);
        assert!((element.contribution(8.0) - 1.344).abs() < 1e-9);
    }

    #[test]
    fn test_currency_symbol() {
        assert_eq!(Currency::USD.to_string(), "$");
        assert_eq!(Currency::EUR.to_string(), "€");
    }
}
