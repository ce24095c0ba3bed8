//! Price sheet: the element price table, iron base price and category table.
//!
//! A [`PriceSheet`] is built once at start-up (either the built-in defaults or
//! an override file) and is read-only afterwards. Files may be TOML or YAML:
//!
//! ```toml
//! as_of = "2026-02"
//! currency = "USD"
//! iron_price_per_kg = 0.55
//!
//! [[elements]]
//! label = "Chromium (Cr)"
//! price_per_kg = 3.00
//!
//! [[categories]]
//! name = "Stainless Steel"
//! min_multiplier = 2.5
//! max_multiplier = 3.5
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::category::Category;
use crate::element::{Currency, Element, IRON_LABEL};
use crate::error::{PricingError, PricingResult};

/// Base price of iron per kilogram.
pub const IRON_BASE_PRICE: f64 = 0.55;

/// Date label of the built-in market prices.
pub const DEFAULT_AS_OF: &str = "2026-02";

const DEFAULT_ELEMENTS: &[(&str, &str, f64)] = &[
    ("Carbon", "C", 0.15),
    ("Silicon", "Si", 1.50),
    ("Manganese", "Mn", 1.40),
    ("Chromium", "Cr", 3.00),
    ("Nickel", "Ni", 16.80),
    ("Molybdenum", "Mo", 48.00),
    ("Vanadium", "V", 32.50),
    ("Tungsten", "W", 42.00),
    ("Cobalt", "Co", 31.00),
    ("Copper", "Cu", 9.20),
    ("Aluminum", "Al", 2.40),
    ("Niobium", "Nb", 45.00),
];

const DEFAULT_CATEGORIES: &[(&str, f64, f64)] = &[
    ("Alloyed Constructional Steel", 2.0, 2.6),
    ("Stainless Steel", 2.5, 3.5),
    ("Alloyed Heat Resistant Steel", 3.0, 4.5),
    ("Alloyed Tool Steel", 3.5, 5.5),
    ("High Speed Steels (HSS)", 6.0, 9.0),
];

/// Immutable pricing configuration.
///
/// Serializes to the same layout [`PriceSheet::load`] reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "PriceSheetFile")]
pub struct PriceSheet {
    as_of: Option<String>,
    currency: Currency,
    iron_price_per_kg: f64,
    elements: Vec<Element>,
    categories: Vec<Category>,
}

/// On-disk representation of a price sheet.
#[derive(Debug, Serialize, Deserialize)]
struct PriceSheetFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    as_of: Option<String>,
    #[serde(default)]
    currency: Currency,
    #[serde(default = "default_iron_price")]
    iron_price_per_kg: f64,
    elements: Vec<ElementEntry>,
    categories: Vec<CategoryEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ElementEntry {
    label: String,
    price_per_kg: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct CategoryEntry {
    name: String,
    min_multiplier: f64,
    max_multiplier: f64,
}

fn default_iron_price() -> f64 {
    IRON_BASE_PRICE
}

impl From<PriceSheet> for PriceSheetFile {
    fn from(sheet: PriceSheet) -> Self {
        Self {
            as_of: sheet.as_of,
            currency: sheet.currency,
            iron_price_per_kg: sheet.iron_price_per_kg,
            elements: sheet
                .elements
                .iter()
                .map(|e| ElementEntry {
                    label: e.label(),
                    price_per_kg: e.price_per_kg,
                })
                .collect(),
            categories: sheet
                .categories
                .into_iter()
                .map(|c| CategoryEntry {
                    name: c.name,
                    min_multiplier: c.band.min(),
                    max_multiplier: c.band.max(),
                })
                .collect(),
        }
    }
}

impl Default for PriceSheet {
    fn default() -> Self {
        let elements = DEFAULT_ELEMENTS
            .iter()
            .map(|(name, symbol, price)| Element::new(*name, *symbol, *price))
            .collect();

        // The built-in bands are all valid, so the filter never drops an entry.
        let categories = DEFAULT_CATEGORIES
            .iter()
            .filter_map(|(name, min, max)| Category::new(*name, *min, *max).ok())
            .collect();

        Self {
            as_of: Some(DEFAULT_AS_OF.to_string()),
            currency: Currency::USD,
            iron_price_per_kg: IRON_BASE_PRICE,
            elements,
            categories,
        }
    }
}

impl PriceSheet {
    /// Build and validate a price sheet.
    pub fn new(
        elements: Vec<Element>,
        iron_price_per_kg: f64,
        categories: Vec<Category>,
    ) -> PricingResult<Self> {
        let sheet = Self {
            as_of: None,
            currency: Currency::USD,
            iron_price_per_kg,
            elements,
            categories,
        };
        sheet.validate()?;
        Ok(sheet)
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_as_of(mut self, as_of: impl Into<String>) -> Self {
        self.as_of = Some(as_of.into());
        self
    }

    /// Load a price sheet from a `.toml`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> PricingResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let sheet = match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&content)?,
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content)?,
            other => {
                return Err(PricingError::InvalidPriceSheet(format!(
                    "unsupported price sheet format: {} (expected .toml, .yaml or .yml)",
                    other.unwrap_or("<none>")
                )))
            }
        };

        debug!(
            "Loaded price sheet from {:?}: {} elements, {} categories",
            path,
            sheet.elements.len(),
            sheet.categories.len()
        );
        Ok(sheet)
    }

    pub fn from_toml_str(content: &str) -> PricingResult<Self> {
        let file: PriceSheetFile = toml::from_str(content)?;
        Self::from_file(file)
    }

    pub fn from_yaml_str(content: &str) -> PricingResult<Self> {
        let file: PriceSheetFile = serde_yaml::from_str(content)?;
        Self::from_file(file)
    }

    fn from_file(file: PriceSheetFile) -> PricingResult<Self> {
        let elements = file
            .elements
            .iter()
            .map(|e| Element::from_label(&e.label, e.price_per_kg))
            .collect::<PricingResult<Vec<_>>>()?;

        let categories = file
            .categories
            .iter()
            .map(|c| Category::new(c.name.trim(), c.min_multiplier, c.max_multiplier))
            .collect::<PricingResult<Vec<_>>>()?;

        let mut sheet = Self::new(elements, file.iron_price_per_kg, categories)?
            .with_currency(file.currency);
        sheet.as_of = file.as_of;
        Ok(sheet)
    }

    /// Check the sheet's invariants.
    pub fn validate(&self) -> PricingResult<()> {
        if !(self.iron_price_per_kg.is_finite() && self.iron_price_per_kg >= 0.0) {
            return Err(PricingError::InvalidPriceSheet(format!(
                "iron price must be a non-negative number, got {}",
                self.iron_price_per_kg
            )));
        }

        if self.elements.is_empty() {
            return Err(PricingError::InvalidPriceSheet(
                "at least one element is required".to_string(),
            ));
        }

        // Lookups accept a name or a symbol, so every identifier must be unique
        // across the whole table.
        let mut identifiers = HashSet::new();
        for element in &self.elements {
            if !(element.price_per_kg.is_finite() && element.price_per_kg >= 0.0) {
                return Err(PricingError::InvalidPriceSheet(format!(
                    "price of {} must be a non-negative number, got {}",
                    element.label(),
                    element.price_per_kg
                )));
            }
            if element.name.eq_ignore_ascii_case(IRON_LABEL) {
                return Err(PricingError::InvalidPriceSheet(
                    "iron is priced by iron_price_per_kg, not as an element".to_string(),
                ));
            }
            let name = element.name.to_lowercase();
            let symbol = element
                .symbol
                .as_deref()
                .map(str::to_lowercase)
                .filter(|symbol| *symbol != name);
            for identifier in std::iter::once(name).chain(symbol) {
                if !identifiers.insert(identifier.clone()) {
                    return Err(PricingError::InvalidPriceSheet(format!(
                        "element identifier '{}' of {} is already used by another element",
                        identifier,
                        element.label()
                    )));
                }
            }
        }

        if self.categories.is_empty() {
            return Err(PricingError::InvalidPriceSheet(
                "at least one category is required".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for category in &self.categories {
            if category.name.is_empty() {
                return Err(PricingError::InvalidPriceSheet(
                    "category name must not be empty".to_string(),
                ));
            }
            if !names.insert(category.name.to_lowercase()) {
                return Err(PricingError::InvalidPriceSheet(format!(
                    "duplicate category: {}",
                    category.name
                )));
            }
        }

        Ok(())
    }

    pub fn as_of(&self) -> Option<&str> {
        self.as_of.as_deref()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn iron_price_per_kg(&self) -> f64 {
        self.iron_price_per_kg
    }

    /// Elements in table order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Categories in table order; numbering for selection starts at 1.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Position of an element in the table.
    pub fn element_index(&self, id: &str) -> PricingResult<usize> {
        self.elements
            .iter()
            .position(|e| e.matches(id))
            .ok_or_else(|| PricingError::UnknownElement(id.trim().to_string()))
    }

    /// Look up an element by label, symbol or name.
    pub fn element(&self, id: &str) -> PricingResult<&Element> {
        let index = self.element_index(id)?;
        Ok(&self.elements[index])
    }

    /// Look up a category by its 1-based number.
    pub fn category_by_number(&self, number: usize) -> PricingResult<&Category> {
        number
            .checked_sub(1)
            .and_then(|i| self.categories.get(i))
            .ok_or_else(|| {
                PricingError::InvalidCategorySelection(format!(
                    "{} is not between 1 and {}",
                    number,
                    self.categories.len()
                ))
            })
    }

    /// Look up a category by 1-based number or by name (case-insensitive).
    pub fn category(&self, selector: &str) -> PricingResult<&Category> {
        let selector = selector.trim();
        if let Ok(number) = selector.parse::<usize>() {
            return self
                .category_by_number(number)
                .map_err(|_| PricingError::UnknownCategory(selector.to_string()));
        }
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(selector))
            .ok_or_else(|| PricingError::UnknownCategory(selector.to_string()))
    }
}
