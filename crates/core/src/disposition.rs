//! Listing dispositions and the transition plan between them.
//!
//! A listing is always in exactly one of four dispositions. `keep` and `sell`
//! sit on the *offer* side (the owner has the game), `buy` and `wish` on the
//! *want* side. `sell` and `buy` are *published*: they carry a price and show
//! up in game and place listings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::market::MarketConfig;
use crate::types::Timestamp;

/// What a profile intends to do with a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    #[default]
    Keep,
    Sell,
    Buy,
    Wish,
}

/// Which side of a trade a disposition sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    /// The owner has the game (`keep`, `sell`).
    Offer,
    /// The owner wants the game (`buy`, `wish`).
    Want,
}

impl TradeSide {
    pub fn opposite(self) -> Self {
        match self {
            TradeSide::Offer => TradeSide::Want,
            TradeSide::Want => TradeSide::Offer,
        }
    }
}

impl Disposition {
    pub const ALL: [Disposition; 4] = [
        Disposition::Keep,
        Disposition::Sell,
        Disposition::Buy,
        Disposition::Wish,
    ];

    /// Storage and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Disposition::Keep => "keep",
            Disposition::Sell => "sell",
            Disposition::Buy => "buy",
            Disposition::Wish => "wish",
        }
    }

    pub fn side(self) -> TradeSide {
        match self {
            Disposition::Keep | Disposition::Sell => TradeSide::Offer,
            Disposition::Buy | Disposition::Wish => TradeSide::Want,
        }
    }

    /// `sell` and `buy` are public offers with a price attached.
    pub fn is_published(self) -> bool {
        matches!(self, Disposition::Sell | Disposition::Buy)
    }

    /// Dispositions on the given side.
    pub fn on_side(side: TradeSide) -> &'static [Disposition] {
        match side {
            TradeSide::Offer => &[Disposition::Keep, Disposition::Sell],
            TradeSide::Want => &[Disposition::Buy, Disposition::Wish],
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Disposition {
    type Err = CoreError;

    /// Accepts the full names as well as the single-letter codes `k`, `s`,
    /// `b` and `w`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep" | "k" => Ok(Disposition::Keep),
            "sell" | "s" => Ok(Disposition::Sell),
            "buy" | "b" => Ok(Disposition::Buy),
            "wish" | "w" => Ok(Disposition::Wish),
            other => Err(CoreError::Validation(format!(
                "Invalid disposition '{other}'. Must be one of: keep, sell, buy, wish"
            ))),
        }
    }
}

impl TryFrom<String> for Disposition {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// `true` when a listing is a live sell offer at `now`.
pub fn ready_to_sell(
    disposition: Disposition,
    active: bool,
    public_date: Timestamp,
    now: Timestamp,
) -> bool {
    disposition == Disposition::Sell && active && public_date <= now
}

/// `true` when a listing is a live buy request at `now`.
pub fn ready_to_buy(
    disposition: Disposition,
    active: bool,
    public_date: Timestamp,
    now: Timestamp,
) -> bool {
    disposition == Disposition::Buy && active && public_date <= now
}

// ---------------------------------------------------------------------------
// Transition plan
// ---------------------------------------------------------------------------

/// Side effects required to move a listing from one disposition to another.
///
/// The repository applies every flag inside a single transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPlan {
    pub from: Disposition,
    pub to: Disposition,
    /// Caller must supply description and price.
    pub requires_terms: bool,
    /// Set `public_date` and `up_time` to now.
    pub stamp_publication: bool,
    /// Set price to zero.
    pub reset_price: bool,
    /// Drop edges where this listing is the want side (`change_to`).
    pub clear_forward: bool,
    /// Drop edges where this listing is the offer side (`ready_change_to`).
    pub clear_reverse: bool,
    /// Delete every comment on the listing.
    pub purge_comments: bool,
}

impl TransitionPlan {
    /// Leaving `sell`/`buy` for `keep`/`wish`.
    pub fn is_withdrawal(&self) -> bool {
        self.from.is_published() && !self.to.is_published()
    }
}

/// Compute what moving from `from` to `to` entails.
pub fn plan_transition(from: Disposition, to: Disposition, config: &MarketConfig) -> TransitionPlan {
    let withdraw = from.is_published() && !to.is_published();
    let publish = to.is_published();
    let crosses_sides = from.side() != to.side();

    TransitionPlan {
        from,
        to,
        requires_terms: publish,
        stamp_publication: publish,
        reset_price: !publish,
        clear_forward: withdraw || crosses_sides,
        clear_reverse: (publish && !from.is_published()) || crosses_sides,
        purge_comments: withdraw && config.purge_comments_on_withdraw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};

    fn config() -> MarketConfig {
        MarketConfig::default()
    }

    #[test]
    fn parses_names_and_codes() {
        assert_eq!("keep".parse::<Disposition>().unwrap(), Disposition::Keep);
        assert_eq!("s".parse::<Disposition>().unwrap(), Disposition::Sell);
        assert_eq!("b".parse::<Disposition>().unwrap(), Disposition::Buy);
        assert_eq!("wish".parse::<Disposition>().unwrap(), Disposition::Wish);
    }

    #[test]
    fn rejects_unknown_disposition() {
        assert_matches!("trade".parse::<Disposition>(), Err(CoreError::Validation(_)));
        assert_matches!("".parse::<Disposition>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Disposition::Wish).unwrap();
        assert_eq!(json, "\"wish\"");
    }

    #[test]
    fn default_is_keep() {
        assert_eq!(Disposition::default(), Disposition::Keep);
    }

    #[test]
    fn sides_are_partitioned() {
        for d in Disposition::ALL {
            assert!(Disposition::on_side(d.side()).contains(&d));
            assert!(!Disposition::on_side(d.side().opposite()).contains(&d));
        }
    }

    #[test]
    fn ready_to_sell_requires_all_three_conditions() {
        let now = Utc::now();
        let past = now - Duration::hours(1);
        let future = now + Duration::hours(1);

        assert!(ready_to_sell(Disposition::Sell, true, past, now));
        assert!(ready_to_sell(Disposition::Sell, true, now, now));
        assert!(!ready_to_sell(Disposition::Sell, false, past, now));
        assert!(!ready_to_sell(Disposition::Sell, true, future, now));
        assert!(!ready_to_sell(Disposition::Keep, true, past, now));
        assert!(!ready_to_sell(Disposition::Buy, true, past, now));
    }

    #[test]
    fn ready_to_buy_mirrors_ready_to_sell() {
        let now = Utc::now();
        assert!(ready_to_buy(Disposition::Buy, true, now, now));
        assert!(!ready_to_buy(Disposition::Sell, true, now, now));
    }

    #[test]
    fn sell_to_keep_clears_change_to_and_price() {
        let plan = plan_transition(Disposition::Sell, Disposition::Keep, &config());
        assert!(plan.is_withdrawal());
        assert!(plan.clear_forward);
        assert!(plan.reset_price);
        assert!(plan.purge_comments);
        assert!(!plan.requires_terms);
        // keep and sell are on the same side, so offers pointing here survive.
        assert!(!plan.clear_reverse);
    }

    #[test]
    fn keep_to_sell_requires_terms_and_clears_reverse() {
        let plan = plan_transition(Disposition::Keep, Disposition::Sell, &config());
        assert!(plan.requires_terms);
        assert!(plan.stamp_publication);
        assert!(plan.clear_reverse);
        assert!(!plan.clear_forward);
        assert!(!plan.reset_price);
        assert!(!plan.purge_comments);
    }

    #[test]
    fn wish_to_buy_keeps_forward_edges() {
        let plan = plan_transition(Disposition::Wish, Disposition::Buy, &config());
        assert!(plan.requires_terms);
        assert!(!plan.clear_forward);
    }

    #[test]
    fn crossing_sides_clears_everything() {
        for (from, to) in [
            (Disposition::Keep, Disposition::Wish),
            (Disposition::Sell, Disposition::Buy),
            (Disposition::Buy, Disposition::Keep),
            (Disposition::Wish, Disposition::Sell),
        ] {
            let plan = plan_transition(from, to, &config());
            assert!(plan.clear_forward, "{from} -> {to} must clear forward");
            assert!(plan.clear_reverse, "{from} -> {to} must clear reverse");
        }
    }

    #[test]
    fn republishing_is_not_a_withdrawal() {
        let plan = plan_transition(Disposition::Sell, Disposition::Sell, &config());
        assert!(plan.requires_terms);
        assert!(!plan.is_withdrawal());
        assert!(!plan.clear_forward);
        assert!(!plan.clear_reverse);
        assert!(!plan.purge_comments);
    }

    #[test]
    fn keep_to_keep_only_resets_price() {
        let plan = plan_transition(Disposition::Keep, Disposition::Keep, &config());
        assert!(plan.reset_price);
        assert!(!plan.clear_forward);
        assert!(!plan.clear_reverse);
        assert!(!plan.purge_comments);
    }

    #[test]
    fn comment_purge_follows_config() {
        let config = MarketConfig {
            purge_comments_on_withdraw: false,
            ..MarketConfig::default()
        };
        let plan = plan_transition(Disposition::Buy, Disposition::Wish, &config);
        assert!(plan.is_withdrawal());
        assert!(!plan.purge_comments);
    }
}
