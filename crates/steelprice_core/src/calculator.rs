//! Pricing calculator.
//!
//! Turns a composition into a raw melt cost per kilogram and projects a
//! retail range with a multiplier band. Every front end goes through
//! [`PriceCalculator::compute`]; it is a pure function of the composition,
//! the band and the (immutable) price sheet.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::category::MultiplierBand;
use crate::composition::Composition;
use crate::element::IRON_LABEL;
use crate::error::{PricingError, PricingResult};
use crate::sheet::PriceSheet;

/// How far above 100% a total may drift from repeated float additions.
pub const TOTAL_TOLERANCE: f64 = 1e-6;

/// Kilograms per metric tonne.
pub const KG_PER_TONNE: f64 = 1000.0;

/// Cost contribution of one constituent per kilogram of steel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostContribution {
    /// Element label, or "Iron" for the balance
    pub element: String,
    /// Mass percentage
    pub percent: f64,
    /// Contribution to the raw cost per kilogram
    pub cost_per_kg: f64,
}

/// Outcome of a single pricing calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEstimate {
    /// Iron balance in percent
    pub iron_percent: f64,
    /// Sum of all listed alloy percentages
    pub alloy_percent: f64,
    /// Raw melt cost per kilogram
    pub raw_cost_per_kg: f64,
    /// Lower retail bound per kilogram
    pub retail_min_per_kg: f64,
    /// Upper retail bound per kilogram
    pub retail_max_per_kg: f64,
    /// Multiplier band that produced the retail range
    pub band: MultiplierBand,
    /// Non-zero elements in table order, followed by iron
    pub breakdown: Vec<CostContribution>,
}

impl PriceEstimate {
    pub fn retail_min_per_tonne(&self) -> f64 {
        self.retail_min_per_kg * KG_PER_TONNE
    }

    pub fn retail_max_per_tonne(&self) -> f64 {
        self.retail_max_per_kg * KG_PER_TONNE
    }

    pub fn iron_cost_per_kg(&self) -> f64 {
        self.breakdown
            .iter()
            .filter(|c| c.element == IRON_LABEL)
            .map(|c| c.cost_per_kg)
            .sum()
    }

    pub fn alloy_cost_per_kg(&self) -> f64 {
        self.raw_cost_per_kg - self.iron_cost_per_kg()
    }
}

/// Stateless calculator over a price sheet.
#[derive(Debug, Clone, Copy)]
pub struct PriceCalculator<'a> {
    sheet: &'a PriceSheet,
}

impl<'a> PriceCalculator<'a> {
    pub fn new(sheet: &'a PriceSheet) -> Self {
        Self { sheet }
    }

    pub fn sheet(&self) -> &'a PriceSheet {
        self.sheet
    }

    /// Compute the raw cost and retail range for a composition.
    pub fn compute(
        &self,
        composition: &Composition,
        band: &MultiplierBand,
    ) -> PricingResult<PriceEstimate> {
        let percents = self.resolve(composition)?;

        let total_percent: f64 = percents.iter().flatten().sum();
        let iron_percent = 100.0 - total_percent;
        if iron_percent < -TOTAL_TOLERANCE {
            return Err(PricingError::InvalidComposition(format!(
                "total percentage is {:.2}% (must be <= 100)",
                total_percent
            )));
        }
        let iron_percent = iron_percent.max(0.0);

        let mut breakdown: Vec<CostContribution> = self
            .sheet
            .elements()
            .iter()
            .zip(&percents)
            .filter_map(|(element, pct)| pct.filter(|p| *p > 0.0).map(|p| (element, p)))
            .map(|(element, pct)| CostContribution {
                element: element.label(),
                percent: pct,
                cost_per_kg: element.contribution(pct),
            })
            .collect();

        breakdown.push(CostContribution {
            element: IRON_LABEL.to_string(),
            percent: iron_percent,
            cost_per_kg: (iron_percent / 100.0) * self.sheet.iron_price_per_kg(),
        });

        let raw_cost_per_kg: f64 = breakdown.iter().map(|c| c.cost_per_kg).sum();

        debug!(
            total_percent,
            iron_percent, raw_cost_per_kg, "Computed raw melt cost"
        );

        Ok(PriceEstimate {
            iron_percent,
            alloy_percent: total_percent,
            raw_cost_per_kg,
            retail_min_per_kg: raw_cost_per_kg * band.min(),
            retail_max_per_kg: raw_cost_per_kg * band.max(),
            band: *band,
            breakdown,
        })
    }

    /// Compute using the band of a category selected by number or name.
    pub fn compute_for_category(
        &self,
        composition: &Composition,
        selector: &str,
    ) -> PricingResult<PriceEstimate> {
        let category = self.sheet.category(selector)?;
        self.compute(composition, &category.band)
    }

    /// Validate entries and map them onto table positions.
    fn resolve(&self, composition: &Composition) -> PricingResult<Vec<Option<f64>>> {
        let mut percents = vec![None; self.sheet.elements().len()];

        for (id, pct) in composition.iter() {
            if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
                return Err(PricingError::InvalidComposition(format!(
                    "{} must be between 0 and 100, got {}",
                    id, pct
                )));
            }

            let index = self.sheet.element_index(id)?;
            if percents[index].replace(pct).is_some() {
                return Err(PricingError::InvalidComposition(format!(
                    "{} is listed more than once",
                    self.sheet.elements()[index].label()
                )));
            }
        }

        Ok(percents)
    }
}
