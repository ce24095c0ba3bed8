//! Number and money formatting helpers shared by the front ends.

use crate::element::Currency;

/// Format a per-kilogram amount with two decimals, e.g. `$5.73`.
pub fn money(currency: Currency, amount: f64) -> String {
    format!("{}{:.2}", currency, amount)
}

/// Format a whole amount with thousands separators, e.g. `$5,728`.
pub fn money_whole(currency: Currency, amount: f64) -> String {
    format!("{}{}", currency, thousands(amount))
}

/// Round to a whole number and insert thousands separators.
pub fn thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };

    let mut result = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    result.push_str(sign);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Format a percentage with two decimals, e.g. `74.00%`.
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0.0), "0");
        assert_eq!(thousands(550.0), "550");
        assert_eq!(thousands(5727.5000001), "5,728");
        assert_eq!(thousands(1234567.0), "1,234,567");
        assert_eq!(thousands(-1234.0), "-1,234");
    }

    #[test]
    fn test_money() {
        assert_eq!(money(Currency::USD, 5.727500000000001), "$5.73");
        assert_eq!(money(Currency::EUR, 0.55), "€0.55");
        assert_eq!(money_whole(Currency::USD, 8018.500000000001), "$8,019");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(74.0), "74.00%");
        assert_eq!(percent(0.126), "0.13%");
    }
}
