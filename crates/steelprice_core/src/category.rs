//! Steel categories and their retail multiplier bands.

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};

/// Retail markup range applied to raw material cost.
///
/// Both bounds are finite and positive with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBand")]
pub struct MultiplierBand {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawBand {
    min: f64,
    max: f64,
}

impl TryFrom<RawBand> for MultiplierBand {
    type Error = PricingError;

    fn try_from(raw: RawBand) -> PricingResult<Self> {
        Self::new(raw.min, raw.max)
    }
}

impl MultiplierBand {
    pub fn new(min: f64, max: f64) -> PricingResult<Self> {
        let valid = min.is_finite() && max.is_finite() && min > 0.0 && max > 0.0 && min <= max;
        if !valid {
            return Err(PricingError::InvalidMultiplier { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl std::fmt::Display for MultiplierBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x - {}x", multiplier(self.min), multiplier(self.max))
    }
}

/// Whole multipliers keep one decimal ("2.0x"), others print as-is ("2.25x").
fn multiplier(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// A steel category with its multiplier band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Category name (e.g., "Stainless Steel")
    pub name: String,
    /// Retail multiplier band
    pub band: MultiplierBand,
}

impl Category {
    pub fn new(name: impl Into<String>, min: f64, max: f64) -> PricingResult<Self> {
        Ok(Self {
            name: name.into(),
            band: MultiplierBand::new(min, max)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_validation() {
        assert!(MultiplierBand::new(2.5, 3.5).is_ok());
        assert!(MultiplierBand::new(3.0, 3.0).is_ok());
        assert!(MultiplierBand::new(3.5, 2.5).is_err());
        assert!(MultiplierBand::new(0.0, 1.0).is_err());
        assert!(MultiplierBand::new(-1.0, 1.0).is_err());
        assert!(MultiplierBand::new(1.0, f64::INFINITY).is_err());
        assert!(MultiplierBand::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_band_display() {
        let band = MultiplierBand::new(2.5, 3.5).unwrap();
        assert_eq!(band.to_string(), "2.5x - 3.5x");
        let band = MultiplierBand::new(6.0, 9.0).unwrap();
        assert_eq!(band.to_string(), "6.0x - 9.0x");
        let band = MultiplierBand::new(2.25, 3.0).unwrap();
        assert_eq!(band.to_string(), "2.25x - 3.0x");
    }

    #[test]
    fn test_band_deserialize_rejects_inverted() {
        let ok: Result<MultiplierBand, _> = serde_json::from_str(r#"{"min": 2.0, "max": 2.6}"#);
        assert!(ok.is_ok());
        let bad: Result<MultiplierBand, _> = serde_json::from_str(r#"{"min": 3.0, "max": 2.0}"#);
        assert!(bad.is_err());
    }
}
