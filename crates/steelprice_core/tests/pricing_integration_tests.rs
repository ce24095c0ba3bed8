//! Integration tests for price sheet loading and quoting.

use std::fs;
use tempfile::tempdir;

use steelprice_core::{
    Composition, Currency, PriceCalculator, PriceSheet, PricingError, Quote, IRON_LABEL,
};

const EUR_SHEET_TOML: &str = r#"
as_of = "2026-03"
currency = "EUR"
iron_price_per_kg = 0.50

[[elements]]
label = "Chromium (Cr)"
price_per_kg = 2.80

[[elements]]
label = "Nickel (Ni)"
price_per_kg = 15.50

[[categories]]
name = "Stainless Steel"
min_multiplier = 2.0
max_multiplier = 3.0
"#;

/// Test a full quote from a price sheet loaded from disk.
#[test]
fn test_quote_from_toml_sheet() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("prices.toml");
    fs::write(&path, EUR_SHEET_TOML).unwrap();

    let sheet = PriceSheet::load(&path).unwrap();
    assert_eq!(sheet.currency(), Currency::EUR);

    let composition = Composition::new().with("Cr", 18.0).with("Ni", 8.0);
    let category = sheet.category("1").unwrap();
    let estimate = PriceCalculator::new(&sheet)
        .compute(&composition, &category.band)
        .unwrap();

    // 0.18 * 2.80 + 0.08 * 15.50 + 0.74 * 0.50
    let expected_raw = 0.504 + 1.24 + 0.37;
    assert!((estimate.raw_cost_per_kg - expected_raw).abs() < 1e-9);
    assert!((estimate.retail_min_per_kg - expected_raw * 2.0).abs() < 1e-9);
    assert!((estimate.retail_max_per_kg - expected_raw * 3.0).abs() < 1e-9);

    let quote = Quote::new("", category, &sheet, estimate);
    let text = quote.render_text();
    assert!(text.contains("Custom Grade"));
    assert!(text.contains("€2.11 /kg"));
    assert!(text.contains("2026-03"));
}

/// Test YAML loading produces the same sheet as the equivalent TOML.
#[test]
fn test_yaml_and_toml_agree() {
    let temp = tempdir().unwrap();
    let toml_path = temp.path().join("prices.toml");
    let yaml_path = temp.path().join("prices.yml");

    fs::write(&toml_path, EUR_SHEET_TOML).unwrap();
    fs::write(
        &yaml_path,
        r#"
as_of: "2026-03"
currency: EUR
iron_price_per_kg: 0.50
elements:
  - label: Chromium (Cr)
    price_per_kg: 2.80
  - label: Nickel (Ni)
    price_per_kg: 15.50
categories:
  - name: Stainless Steel
    min_multiplier: 2.0
    max_multiplier: 3.0
"#,
    )
    .unwrap();

    let from_toml = PriceSheet::load(&toml_path).unwrap();
    let from_yaml = PriceSheet::load(&yaml_path).unwrap();
    assert_eq!(from_toml, from_yaml);
}

/// Test load failures are reported with the right error kind.
#[test]
fn test_load_errors() {
    let temp = tempdir().unwrap();

    let missing = PriceSheet::load(&temp.path().join("missing.toml"));
    assert!(matches!(missing, Err(PricingError::Io(_))));

    let json_path = temp.path().join("prices.json");
    fs::write(&json_path, "{}").unwrap();
    assert!(matches!(
        PriceSheet::load(&json_path),
        Err(PricingError::InvalidPriceSheet(_))
    ));

    let broken_path = temp.path().join("broken.toml");
    fs::write(&broken_path, "elements = [").unwrap();
    assert!(matches!(
        PriceSheet::load(&broken_path),
        Err(PricingError::Toml(_))
    ));

    let negative_path = temp.path().join("negative.yaml");
    fs::write(
        &negative_path,
        r#"
elements:
  - label: Nickel (Ni)
    price_per_kg: -3.0
categories:
  - name: Stainless Steel
    min_multiplier: 2.5
    max_multiplier: 3.5
"#,
    )
    .unwrap();
    assert!(matches!(
        PriceSheet::load(&negative_path),
        Err(PricingError::InvalidPriceSheet(_))
    ));
}

/// Test the cost invariants hold for every category on a high speed steel grade.
#[test]
fn test_invariants_across_categories() {
    let sheet = PriceSheet::default();
    let calculator = PriceCalculator::new(&sheet);
    let composition = Composition::new()
        .with("C", 1.28)
        .with("Cr", 4.0)
        .with("Mo", 5.0)
        .with("V", 3.1)
        .with("W", 6.4)
        .with("Co", 8.5);

    for category in sheet.categories() {
        let estimate = calculator.compute(&composition, &category.band).unwrap();

        let sum: f64 = estimate.breakdown.iter().map(|c| c.cost_per_kg).sum();
        assert!((estimate.raw_cost_per_kg - sum).abs() < 1e-9);
        assert!(estimate.retail_min_per_kg <= estimate.retail_max_per_kg);
        assert!(estimate.iron_percent >= 0.0);
        assert!((estimate.iron_percent + composition.total_percent() - 100.0).abs() < 1e-9);
        assert_eq!(
            estimate.breakdown.last().map(|c| c.element.as_str()),
            Some(IRON_LABEL)
        );
    }
}
