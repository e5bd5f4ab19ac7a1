//! Listing price rules.
//!
//! Prices are stored as `NUMERIC(6,2)`: at most six significant digits, two
//! of them after the decimal point, so the largest storable price is
//! `9999.99`.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::disposition::Disposition;
use crate::error::CoreError;

/// Total significant digits allowed.
pub const MAX_DIGITS: u32 = 6;

/// Fractional digits allowed.
pub const DECIMAL_PLACES: u32 = 2;

/// Smallest price that no longer fits `NUMERIC(6,2)`.
fn price_ceiling() -> Decimal {
    Decimal::new(10_i64.pow(MAX_DIGITS), DECIMAL_PLACES)
}

/// Validate a price and return it rescaled to two fractional digits.
pub fn validate_price(price: Decimal) -> Result<Decimal, CoreError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(CoreError::Validation("Price must not be negative".into()));
    }
    if price.normalize().scale() > DECIMAL_PLACES {
        return Err(CoreError::Validation(format!(
            "Price must have at most {DECIMAL_PLACES} decimal places"
        )));
    }
    if price >= price_ceiling() {
        return Err(CoreError::Validation(format!(
            "Price must have at most {MAX_DIGITS} digits in total"
        )));
    }
    let mut scaled = price;
    scaled.rescale(DECIMAL_PLACES);
    Ok(scaled)
}

/// Parse and validate a price typed by a user.
pub fn parse_price(input: &str) -> Result<Decimal, CoreError> {
    let trimmed = input.trim();
    let price = Decimal::from_str(trimmed)
        .map_err(|_| CoreError::Validation(format!("'{trimmed}' is not a valid decimal price")))?;
    validate_price(price)
}

/// Validate a price against the disposition it will be stored with.
///
/// Only published dispositions carry a price; `keep` and `wish` must be zero.
pub fn validate_price_for(disposition: Disposition, price: Decimal) -> Result<Decimal, CoreError> {
    let price = validate_price(price)?;
    if !disposition.is_published() && !price.is_zero() {
        return Err(CoreError::Validation(format!(
            "A {disposition} listing cannot carry a price"
        )));
    }
    Ok(price)
}
