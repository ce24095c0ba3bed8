//! # steelprice_core
//!
//! Raw material cost and retail price estimation for steel grades.
//!
//! A composition lists percentage weights of alloying elements; iron makes up
//! the balance. The calculator prices each constituent from a fixed
//! [`PriceSheet`], sums them into a raw melt cost per kilogram and applies a
//! category's [`MultiplierBand`] to project a retail range.
//!
//! # Example
//!
//! ```rust
//! use steelprice_core::{Composition, PriceCalculator, PriceSheet};
//!
//! let sheet = PriceSheet::default();
//! let calculator = PriceCalculator::new(&sheet);
//!
//! let composition = Composition::new()
//!     .with("Chromium (Cr)", 18.0)
//!     .with("Nickel (Ni)", 8.0);
//!
//! let estimate = calculator
//!     .compute_for_category(&composition, "Stainless Steel")
//!     .unwrap();
//! assert!((estimate.iron_percent - 74.0).abs() < 1e-9);
//! assert!((estimate.raw_cost_per_kg - 2.291).abs() < 1e-9);
//! ```

pub mod calculator;
pub mod category;
pub mod composition;
pub mod element;
pub mod error;
pub mod format;
pub mod report;
pub mod sheet;

// Re-export main types for convenience
pub use calculator::{CostContribution, PriceCalculator, PriceEstimate, KG_PER_TONNE, TOTAL_TOLERANCE};
pub use category::{Category, MultiplierBand};
pub use composition::{parse_percent, Composition};
pub use element::{Currency, Element, IRON_LABEL};
pub use error::{PricingError, PricingResult};
pub use report::{display_grade_name, render_tables, Quote, DEFAULT_GRADE_NAME};
pub use sheet::{PriceSheet, DEFAULT_AS_OF, IRON_BASE_PRICE};
