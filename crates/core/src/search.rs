//! Listing search criteria and pagination helpers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::disposition::Disposition;
use crate::error::CoreError;

/// Which published listings a search returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proposition {
    Buy,
    Sell,
    #[default]
    All,
}

impl Proposition {
    pub fn dispositions(self) -> &'static [Disposition] {
        match self {
            Proposition::Buy => &[Disposition::Buy],
            Proposition::Sell => &[Disposition::Sell],
            Proposition::All => &[Disposition::Sell, Disposition::Buy],
        }
    }

    /// Disposition names for a `= ANY($n)` bind.
    pub fn disposition_names(self) -> Vec<String> {
        self.dispositions()
            .iter()
            .map(|d| d.as_str().to_string())
            .collect()
    }
}

impl FromStr for Proposition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" | "b" => Ok(Proposition::Buy),
            "sell" | "s" => Ok(Proposition::Sell),
            "all" | "a" | "" => Ok(Proposition::All),
            other => Err(CoreError::Validation(format!(
                "Invalid proposition '{other}'. Must be one of: buy, sell, all"
            ))),
        }
    }
}

/// Normalized search input. Blank names mean "any".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchCriteria {
    pub game: Option<String>,
    pub place: Option<String>,
    pub proposition: Proposition,
}

impl SearchCriteria {
    pub fn new(game: Option<&str>, place: Option<&str>, proposition: Proposition) -> Self {
        Self {
            game: non_blank(game),
            place: non_blank(place),
            proposition,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Clamp a user-provided page size to `[1, max]`, defaulting when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Offset of the first row on a one-based `page`.
pub fn page_offset(page: Option<i64>, per_page: i64) -> i64 {
    (page.unwrap_or(1).max(1) - 1) * per_page
}
