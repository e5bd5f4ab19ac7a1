//! Change-to (trade) relation rules.
//!
//! Trade edges are directed from the want side to the offer side: a `buy` or
//! `wish` listing names the `keep`/`sell` listings its owner would give up in
//! exchange. The same edge set is editable from either end:
//!
//! - from a want-side listing, the caller replaces the edges leaving it
//!   (its `change_to` set);
//! - from an offer-side listing, the caller replaces the edges entering it
//!   (its `ready_change_to` set).
//!
//! Both ends must belong to the same profile.

use std::collections::BTreeSet;

use crate::disposition::{Disposition, TradeSide};
use crate::error::CoreError;
use crate::types::DbId;

/// The minimum a rule check needs to know about a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeCandidate {
    pub id: DbId,
    pub profile_id: DbId,
    pub disposition: Disposition,
}

/// Which edge set a replacement rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDirection {
    /// Edges leaving the listing (listing is on the want side).
    Forward,
    /// Edges entering the listing (listing is on the offer side).
    Reverse,
}

impl EdgeDirection {
    pub fn for_listing(disposition: Disposition) -> Self {
        match disposition.side() {
            TradeSide::Want => EdgeDirection::Forward,
            TradeSide::Offer => EdgeDirection::Reverse,
        }
    }
}

/// Deduplicate and sort requested target ids.
pub fn normalize_target_ids(ids: &[DbId]) -> Vec<DbId> {
    ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

/// Check that every target is a valid counterpart for `listing`.
///
/// `targets` must already be resolved from the requested ids; any requested
/// id missing from `targets` is reported as not found by the caller.
pub fn validate_trade_targets(
    listing: &TradeCandidate,
    targets: &[TradeCandidate],
) -> Result<EdgeDirection, CoreError> {
    let wanted_side = listing.disposition.side().opposite();

    for target in targets {
        if target.id == listing.id {
            return Err(CoreError::Validation(
                "A listing cannot be traded for itself".into(),
            ));
        }
        if target.profile_id != listing.profile_id {
            return Err(CoreError::Validation(format!(
                "Listing {} belongs to another profile",
                target.id
            )));
        }
        if target.disposition.side() != wanted_side {
            let allowed: Vec<&str> = Disposition::on_side(wanted_side)
                .iter()
                .map(|d| d.as_str())
                .collect();
            return Err(CoreError::Validation(format!(
                "Listing {} is marked {}; a {} listing can only trade with {}",
                target.id,
                target.disposition,
                listing.disposition,
                allowed.join(" or ")
            )));
        }
    }

    Ok(EdgeDirection::for_listing(listing.disposition))
}

/// Orient a (listing, target) pair as `(from_listing_id, to_listing_id)`.
pub fn edge_for(direction: EdgeDirection, listing_id: DbId, target_id: DbId) -> (DbId, DbId) {
    match direction {
        EdgeDirection::Forward => (listing_id, target_id),
        EdgeDirection::Reverse => (target_id, listing_id),
    }
}
