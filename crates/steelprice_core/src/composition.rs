//! Chemical composition input.

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};

/// Percentage weights keyed by element identifier.
///
/// Iron is never listed; it is the balance up to 100%. Setting the same
/// identifier twice replaces the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    entries: Vec<(String, f64)>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Composition::set`].
    pub fn with(mut self, element: impl Into<String>, percent: f64) -> Self {
        self.set(element, percent);
        self
    }

    pub fn set(&mut self, element: impl Into<String>, percent: f64) {
        let element = element.into();
        match self.entries.iter_mut().find(|(id, _)| *id == element) {
            Some(entry) => entry.1 = percent,
            None => self.entries.push((element, percent)),
        }
    }

    pub fn get(&self, element: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(id, _)| id == element)
            .map(|(_, pct)| *pct)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(id, pct)| (id.as_str(), *pct))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all listed percentages.
    pub fn total_percent(&self) -> f64 {
        self.entries.iter().map(|(_, pct)| pct).sum()
    }

    /// Parse an `ELEMENT=PERCENT` pair (`:` is accepted as separator too).
    pub fn parse_entry(entry: &str) -> PricingResult<(String, f64)> {
        let (id, value) = entry
            .split_once('=')
            .or_else(|| entry.split_once(':'))
            .ok_or_else(|| {
                PricingError::InvalidNumericInput(format!(
                    "expected ELEMENT=PERCENT, got '{}'",
                    entry
                ))
            })?;

        let id = id.trim();
        if id.is_empty() {
            return Err(PricingError::InvalidNumericInput(format!(
                "missing element in '{}'",
                entry
            )));
        }

        Ok((id.to_string(), parse_percent(value)?))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Composition {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut composition = Self::new();
        for (element, percent) in iter {
            composition.set(element, percent);
        }
        composition
    }
}

/// Parse a single percentage value.
///
/// Blank input is 0.0. Non-numeric, non-finite and negative values are rejected.
pub fn parse_percent(input: &str) -> PricingResult<f64> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    let value: f64 = input
        .parse()
        .map_err(|_| PricingError::InvalidNumericInput(format!("'{}' is not a number", input)))?;

    if !value.is_finite() {
        return Err(PricingError::InvalidNumericInput(format!(
            "'{}' is not a finite number",
            input
        )));
    }
    if value < 0.0 {
        return Err(PricingError::InvalidComposition(format!(
            "percentage cannot be negative, got {}",
            value
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_value() {
        let mut composition = Composition::new().with("Cr", 18.0).with("Ni", 8.0);
        composition.set("Cr", 17.5);
        assert_eq!(composition.len(), 2);
        assert_eq!(composition.get("Cr"), Some(17.5));
        assert!((composition.total_percent() - 25.5).abs() < 1e-9);
    }

    #[test]
    fn test_from_iter() {
        let composition: Composition = vec![("Mo", 2.0), ("V", 1.0)].into_iter().collect();
        assert_eq!(composition.get("V"), Some(1.0));
        assert!(!composition.is_empty());
    }

    #[test]
    fn test_parse_entry() {
        assert_eq!(
            Composition::parse_entry("Cr=18").unwrap(),
            ("Cr".to_string(), 18.0)
        );
        assert_eq!(
            Composition::parse_entry(" Nickel (Ni) : 8.5 ").unwrap(),
            ("Nickel (Ni)".to_string(), 8.5)
        );
        assert!(Composition::parse_entry("Cr").is_err());
        assert!(Composition::parse_entry("=5").is_err());
        assert!(Composition::parse_entry("Cr=abc").is_err());
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent("").unwrap(), 0.0);
        assert_eq!(parse_percent("   ").unwrap(), 0.0);
        assert_eq!(parse_percent("0.4").unwrap(), 0.4);
        assert!(matches!(
            parse_percent("-1").unwrap_err(),
            PricingError::InvalidComposition(_)
        ));
        assert!(matches!(
            parse_percent("ten").unwrap_err(),
            PricingError::InvalidNumericInput(_)
        ));
        assert!(parse_percent("inf").is_err());
        assert!(parse_percent("NaN").is_err());
    }
}
