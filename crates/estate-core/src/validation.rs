//! Input validation shared by the command line and web front ends.
//!
//! Each validator trims its input and returns the normalized value, so
//! callers store exactly what was checked.

use jiff::civil::Date;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{MarketError, Result};

/// Default ceiling on a property's daily price.
pub const MAX_DAILY_PRICE: Decimal = dec!(1000000.00);

/// Ceiling on budgets and search price bounds.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000.00);

/// Validates an email address of the shape `local@domain.tld`.
///
/// ```rust
/// use estate_core::validation::validate_email;
///
/// assert!(validate_email("ann@example.com").is_ok());
/// assert!(validate_email("ann@localhost").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<String> {
    let email = email.trim();
    let invalid = || {
        MarketError::invalid_input("email")
            .with_reason(format!("'{email}' is not a valid email address"))
    };

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let dotted = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
    if !dotted {
        return Err(invalid());
    }

    Ok(email.to_string())
}

/// Validates a 16-digit card number. Spaces and dashes are ignored.
pub fn validate_card_number(number: &str) -> Result<String> {
    let digits: String = number
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();
    if digits.len() != 16 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(
            MarketError::invalid_input("card_number").with_reason("must be exactly 16 digits")
        );
    }
    Ok(digits)
}

pub fn validate_cvv(cvv: &str) -> Result<String> {
    let cvv = cvv.trim();
    if cvv.len() != 3 || !cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(MarketError::invalid_input("cvv").with_reason("must be exactly 3 digits"));
    }
    Ok(cvv.to_string())
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(field: &str, value: &str) -> Result<Date> {
    value.trim().parse::<Date>().map_err(|_| {
        MarketError::invalid_input(field).with_reason(format!("'{value}' is not a YYYY-MM-DD date"))
    })
}

/// Parses a card expiry given as `YYYY-MM-DD` or `YYYY-MM` (the first of the
/// month) and requires it to fall after `today`.
pub fn parse_expiry(value: &str, today: Date) -> Result<Date> {
    let value = value.trim();
    let expiry = if value.len() == 7 {
        parse_date("expiry_date", &format!("{value}-01"))?
    } else {
        parse_date("expiry_date", value)?
    };

    if expiry <= today {
        return Err(MarketError::invalid_input("expiry_date").with_reason("card has expired"));
    }
    Ok(expiry)
}

/// Rejects blank required text fields.
pub fn require_text(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(MarketError::invalid_input(field).with_reason("must not be empty"));
    }
    Ok(value.to_string())
}

/// Accepts amounts between zero and `max` with at most two decimal places.
///
/// ```rust
/// use estate_core::validation::{validate_amount, MAX_DAILY_PRICE};
///
/// assert!(validate_amount("price", "19.99".parse().unwrap(), MAX_DAILY_PRICE).is_ok());
/// assert!(validate_amount("price", "19.999".parse().unwrap(), MAX_DAILY_PRICE).is_err());
/// ```
pub fn validate_amount(field: &str, value: Decimal, max: Decimal) -> Result<Decimal> {
    if value < Decimal::ZERO {
        return Err(MarketError::invalid_input(field).with_reason("must not be negative"));
    }
    if value.normalize().scale() > 2 {
        return Err(
            MarketError::invalid_input(field).with_reason("must not have more than two decimal places")
        );
    }
    if value > max {
        return Err(MarketError::invalid_input(field).with_reason(format!("must not exceed {max}")));
    }
    Ok(value)
}

/// Rejects negative or non-finite rates.
pub fn validate_rate(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(
            MarketError::invalid_input(field).with_reason("must be a non-negative number")
        );
    }
    Ok(value)
}

/// Trims optional text, treating blank values as absent.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Today's date in the system time zone.
pub fn today() -> Date {
    jiff::Zoned::now().date()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_email_shapes() {
        assert_eq!(validate_email("  ann@example.com ").unwrap(), "ann@example.com");
        assert!(validate_email("ann.lee@mail.example.org").is_ok());
        assert!(validate_email("annexample.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ann@example").is_err());
        assert!(validate_email("ann@.com").is_err());
        assert!(validate_email("ann@example.").is_err());
        assert!(validate_email("ann@ex@ample.com").is_err());
        assert!(validate_email("ann lee@example.com").is_err());
    }

    #[test]
    fn test_card_number() {
        assert_eq!(
            validate_card_number("4111 1111-1111 1111").unwrap(),
            "4111111111111111"
        );
        assert!(validate_card_number("411111111111111").is_err());
        assert!(validate_card_number("41111111111111112").is_err());
        assert!(validate_card_number("4111a11111111111").is_err());
    }

    #[test]
    fn test_cvv() {
        assert!(validate_cvv("123").is_ok());
        assert!(validate_cvv("12").is_err());
        assert!(validate_cvv("1234").is_err());
        assert!(validate_cvv("12a").is_err());
    }

    #[test]
    fn test_expiry() {
        let today = date(2025, 6, 15);
        assert_eq!(parse_expiry("2027-01-31", today).unwrap(), date(2027, 1, 31));
        assert_eq!(parse_expiry("2027-04", today).unwrap(), date(2027, 4, 1));
        assert!(parse_expiry("2025-06-15", today).is_err());
        assert!(parse_expiry("2024-12", today).is_err());
        assert!(parse_expiry("next year", today).is_err());
    }

    #[test]
    fn test_amounts_and_text() {
        assert!(validate_amount("price", dec!(0), MAX_DAILY_PRICE).is_ok());
        assert!(validate_amount("price", dec!(-0.00), MAX_DAILY_PRICE).is_ok());
        assert!(validate_amount("price", dec!(19.990), MAX_DAILY_PRICE).is_ok());
        assert!(validate_amount("price", dec!(-1), MAX_DAILY_PRICE).is_err());
        assert!(validate_amount("price", dec!(0.001), MAX_DAILY_PRICE).is_err());
        assert!(validate_amount("price", MAX_DAILY_PRICE, MAX_DAILY_PRICE).is_ok());
        assert!(validate_amount("price", dec!(1000000.01), MAX_DAILY_PRICE).is_err());
        assert!(validate_rate("crime_rate", 2.5).is_ok());
        assert!(validate_rate("crime_rate", -0.1).is_err());
        assert!(validate_rate("crime_rate", f64::NAN).is_err());
        assert!(require_text("city", "   ").is_err());
        assert_eq!(require_text("city", " Boston ").unwrap(), "Boston");
    }
}
