//! Price extraction from catalog shop pages.
//!
//! A catalog declares a CSS selector pointing at the element holding the
//! price. The first matching element's text is split on whitespace, the first
//! token has its decimal comma normalized, and the result is parsed as a
//! decimal price.

use std::str::FromStr;

use rust_decimal::Decimal;
use scraper::{Html, Selector};

use crate::pricing::validate_price;

/// Why a page did not yield a price. The `Display` text is what gets stored
/// on a failed parse result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceExtractionError {
    #[error("Invalid price selector '{0}'")]
    InvalidSelector(String),

    #[error("No element matches selector '{0}'")]
    NoMatch(String),

    #[error("Price element is empty")]
    Empty,

    #[error("'{0}' is not a decimal price")]
    NotANumber(String),

    #[error("Price {0} does not fit the price column")]
    OutOfRange(String),
}

/// Check that a selector string parses before it is stored on a catalog.
pub fn validate_selector(selector: &str) -> Result<(), PriceExtractionError> {
    Selector::parse(selector)
        .map(|_| ())
        .map_err(|_| PriceExtractionError::InvalidSelector(selector.to_string()))
}

/// Turn raw price text such as `"59,99 €"` into `"59.99"`.
pub fn normalize_price_text(text: &str) -> Option<String> {
    text.split_whitespace()
        .next()
        .map(|token| token.trim().replace(',', "."))
}

/// Extract the price from `html` using `selector`.
pub fn extract_price(html: &str, selector: &str) -> Result<Decimal, PriceExtractionError> {
    let parsed = Selector::parse(selector)
        .map_err(|_| PriceExtractionError::InvalidSelector(selector.to_string()))?;
    let document = Html::parse_document(html);

    let element = document
        .select(&parsed)
        .next()
        .ok_or_else(|| PriceExtractionError::NoMatch(selector.to_string()))?;

    let text: String = element.text().collect();
    let token = normalize_price_text(&text).ok_or(PriceExtractionError::Empty)?;

    let price =
        Decimal::from_str(&token).map_err(|_| PriceExtractionError::NotANumber(token.clone()))?;

    validate_price(price.round_dp(2))
        .map_err(|_| PriceExtractionError::OutOfRange(price.to_string()))
}
