//! Repository for the `listings` and `listing_trade_edges` tables.
//!
//! Every owner-only mutation locks the listing row (`FOR UPDATE`), checks the
//! acting profile, and applies its changes inside the same transaction.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection, PgPool};
use switchdeck_core::disposition::{plan_transition, ready_to_buy, ready_to_sell, Disposition};
use switchdeck_core::error::CoreError;
use switchdeck_core::market::MarketConfig;
use switchdeck_core::pricing::{validate_price, validate_price_for};
use switchdeck_core::search::SearchCriteria;
use switchdeck_core::trade::{
    edge_for, normalize_target_ids, validate_trade_targets, EdgeDirection, TradeCandidate,
};
use switchdeck_core::types::DbId;

use crate::error::DbError;
use crate::models::listing::{
    CreateListing, Listing, ListingDetail, ListingSummary, SearchOutcome, SetDisposition,
    TradeChoices,
};
use crate::repositories::{GameRepo, PlaceRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, profile_id, game_id, disposition, active, description, price, \
                       public_date, up_time, created_at, updated_at";

/// Listing joined with owner, place and game. Table aliases: `l`, `p`,
/// `u`, `pl`, `g`.
const SUMMARY_SELECT: &str = "SELECT l.id, l.profile_id, u.username, p.place_id, \
                              pl.name AS place_name, l.game_id, g.name AS game_name, \
                              g.slug AS game_slug, l.disposition, l.active, l.description, \
                              l.price, l.public_date, l.up_time \
                              FROM listings l \
                              JOIN profiles p ON p.id = l.profile_id \
                              JOIN users u ON u.id = p.user_id \
                              JOIN places pl ON pl.id = p.place_id \
                              JOIN games g ON g.id = l.game_id";

/// Live offers: active and already published.
const LIVE_FILTER: &str = "l.active AND l.public_date <= NOW()";

#[derive(Debug, FromRow)]
struct CandidateRow {
    id: DbId,
    profile_id: DbId,
    #[sqlx(try_from = "String")]
    disposition: Disposition,
}

impl From<CandidateRow> for TradeCandidate {
    fn from(row: CandidateRow) -> Self {
        TradeCandidate {
            id: row.id,
            profile_id: row.profile_id,
            disposition: row.disposition,
        }
    }
}

/// Provides listing persistence and the disposition state machine.
pub struct ListingRepo;

impl ListingRepo {
    // -----------------------------------------------------------------------
    // Creation and lookup
    // -----------------------------------------------------------------------

    /// Add a game to a profile. Disposition defaults to `keep`; `keep` and
    /// `wish` listings must carry a zero price.
    pub async fn create(
        pool: &PgPool,
        profile_id: DbId,
        input: &CreateListing,
    ) -> Result<Listing, DbError> {
        let disposition = input.disposition.unwrap_or_default();
        let price = validate_price_for(disposition, input.price.unwrap_or(Decimal::ZERO))?;

        if GameRepo::find_by_id(pool, input.game_id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "Game",
                id: input.game_id,
            }
            .into());
        }

        let query = format!(
            "INSERT INTO listings (profile_id, game_id, disposition, description, price)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let listing = sqlx::query_as::<_, Listing>(&query)
            .bind(profile_id)
            .bind(input.game_id)
            .bind(disposition.as_str())
            .bind(input.description.as_deref().unwrap_or(""))
            .bind(price)
            .fetch_one(pool)
            .await?;
        Ok(listing)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ListingSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} WHERE l.id = $1");
        sqlx::query_as::<_, ListingSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Listing with both directions of its trade relation and its comment count.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ListingDetail>, sqlx::Error> {
        let Some(listing) = Self::find_summary(pool, id).await? else {
            return Ok(None);
        };
        let change_to = Self::change_to_ids(pool, id).await?;
        let ready_change_to = Self::ready_change_to_ids(pool, id).await?;
        let comment_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE listing_id = $1")
                .bind(id)
                .fetch_one(pool)
                .await?;

        let now = Utc::now();
        Ok(Some(ListingDetail {
            ready_to_sell: ready_to_sell(
                listing.disposition,
                listing.active,
                listing.public_date,
                now,
            ),
            ready_to_buy: ready_to_buy(
                listing.disposition,
                listing.active,
                listing.public_date,
                now,
            ),
            listing,
            change_to,
            ready_change_to,
            comment_count,
        }))
    }

    /// Ids of the offer-side listings `id` would trade into.
    pub async fn change_to_ids(pool: &PgPool, id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT to_listing_id FROM listing_trade_edges
             WHERE from_listing_id = $1
             ORDER BY to_listing_id",
        )
        .bind(id)
        .fetch_all(pool)
        .await
    }

    /// Ids of the want-side listings that name `id` as a trade target.
    pub async fn ready_change_to_ids(pool: &PgPool, id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT from_listing_id FROM listing_trade_edges
             WHERE to_listing_id = $1
             ORDER BY from_listing_id",
        )
        .bind(id)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Projections
    // -----------------------------------------------------------------------

    /// Active listings, most recently active first.
    pub async fn list_active(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ListingSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT} WHERE l.active
             ORDER BY l.up_time DESC, l.id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ListingSummary>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// One of a profile's four lists. `keep` and `wish` are ordered by game
    /// name, `sell` and `buy` by publication date, newest first. Inactive
    /// listings are left out unless `with_inactive` is set.
    pub async fn profile_list(
        pool: &PgPool,
        profile_id: DbId,
        disposition: Disposition,
        with_inactive: bool,
    ) -> Result<Vec<ListingSummary>, sqlx::Error> {
        let order = if disposition.is_published() {
            "l.public_date DESC, l.id DESC"
        } else {
            "g.name ASC, l.id ASC"
        };
        let query = format!(
            "{SUMMARY_SELECT}
             WHERE l.profile_id = $1 AND l.disposition = $2 AND ($3 OR l.active)
             ORDER BY {order}"
        );
        sqlx::query_as::<_, ListingSummary>(&query)
            .bind(profile_id)
            .bind(disposition.as_str())
            .bind(with_inactive)
            .fetch_all(pool)
            .await
    }

    /// Live listings of a game with the given disposition (`lots_to_sell`
    /// for `sell`, `lots_to_buy` for `buy`).
    pub async fn live_for_game(
        pool: &PgPool,
        game_id: DbId,
        disposition: Disposition,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ListingSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT}
             WHERE l.game_id = $1 AND l.disposition = $2 AND {LIVE_FILTER}
             ORDER BY l.up_time DESC, l.id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ListingSummary>(&query)
            .bind(game_id)
            .bind(disposition.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_live_for_game(
        pool: &PgPool,
        game_id: DbId,
        disposition: Disposition,
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM listings l
             WHERE l.game_id = $1 AND l.disposition = $2 AND {LIVE_FILTER}"
        );
        sqlx::query_scalar(&query)
            .bind(game_id)
            .bind(disposition.as_str())
            .fetch_one(pool)
            .await
    }

    /// Active listings of profiles registered in a place.
    pub async fn active_in_place(
        pool: &PgPool,
        place_id: DbId,
        disposition: Disposition,
    ) -> Result<Vec<ListingSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT}
             WHERE p.place_id = $1 AND l.disposition = $2 AND l.active
             ORDER BY l.up_time DESC, l.id DESC"
        );
        sqlx::query_as::<_, ListingSummary>(&query)
            .bind(place_id)
            .bind(disposition.as_str())
            .fetch_all(pool)
            .await
    }

    /// Search active published listings.
    ///
    /// Game and place are matched by exact name. A name that matches nothing
    /// is echoed back in `no_game` / `no_place` and yields no listings.
    pub async fn search(
        pool: &PgPool,
        criteria: &SearchCriteria,
    ) -> Result<SearchOutcome, sqlx::Error> {
        let mut outcome = SearchOutcome {
            listings: Vec::new(),
            no_game: None,
            no_place: None,
        };

        let mut game_id = None;
        if let Some(name) = &criteria.game {
            match GameRepo::find_by_name(pool, name).await? {
                Some(game) => game_id = Some(game.id),
                None => outcome.no_game = Some(name.clone()),
            }
        }
        let mut place_id = None;
        if let Some(name) = &criteria.place {
            match PlaceRepo::find_by_name(pool, name).await? {
                Some(place) => place_id = Some(place.id),
                None => outcome.no_place = Some(name.clone()),
            }
        }
        if outcome.no_game.is_some() || outcome.no_place.is_some() {
            return Ok(outcome);
        }

        let query = format!(
            "{SUMMARY_SELECT}
             WHERE l.active
               AND l.disposition = ANY($1)
               AND ($2::BIGINT IS NULL OR l.game_id = $2)
               AND ($3::BIGINT IS NULL OR p.place_id = $3)
             ORDER BY l.up_time DESC, l.id DESC"
        );
        outcome.listings = sqlx::query_as::<_, ListingSummary>(&query)
            .bind(criteria.proposition.disposition_names())
            .bind(game_id)
            .bind(place_id)
            .fetch_all(pool)
            .await?;
        Ok(outcome)
    }

    // -----------------------------------------------------------------------
    // Owner-only mutations
    // -----------------------------------------------------------------------

    /// Lock a listing row and check that `actor_profile_id` owns it.
    async fn lock_owned(
        conn: &mut PgConnection,
        id: DbId,
        actor_profile_id: DbId,
    ) -> Result<Listing, DbError> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1 FOR UPDATE");
        let listing = sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Listing",
                id,
            })?;
        if listing.profile_id != actor_profile_id {
            return Err(CoreError::not_owner("listing").into());
        }
        Ok(listing)
    }

    /// Delete a listing. Comments and trade edges go with it.
    pub async fn delete(pool: &PgPool, id: DbId, actor_profile_id: DbId) -> Result<(), DbError> {
        let mut tx = pool.begin().await?;
        Self::lock_owned(&mut *tx, id, actor_profile_id).await?;
        sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Move a listing to another disposition.
    ///
    /// Publishing (`sell`/`buy`) requires a description and a price and
    /// stamps `public_date`; every other target zeroes the price. Trade
    /// edges and comments are cleared according to the transition plan.
    pub async fn set_disposition(
        pool: &PgPool,
        id: DbId,
        actor_profile_id: DbId,
        input: &SetDisposition,
        config: &MarketConfig,
    ) -> Result<Listing, DbError> {
        let mut tx = pool.begin().await?;
        let current = Self::lock_owned(&mut *tx, id, actor_profile_id).await?;
        let plan = plan_transition(current.disposition, input.disposition, config);

        let listing = if plan.requires_terms {
            let (Some(description), Some(price)) = (&input.description, input.price) else {
                return Err(CoreError::Validation(format!(
                    "A {} listing requires a description and a price",
                    plan.to
                ))
                .into());
            };
            let price = validate_price_for(plan.to, price)?;
            let query = format!(
                "UPDATE listings SET
                    disposition = $2,
                    description = $3,
                    price = $4,
                    public_date = NOW(),
                    up_time = GREATEST(up_time, NOW())
                 WHERE id = $1
                 RETURNING {COLUMNS}"
            );
            sqlx::query_as::<_, Listing>(&query)
                .bind(id)
                .bind(plan.to.as_str())
                .bind(description)
                .bind(price)
                .fetch_one(&mut *tx)
                .await?
        } else {
            let query = format!(
                "UPDATE listings SET
                    disposition = $2,
                    price = CASE WHEN $3 THEN 0 ELSE price END,
                    up_time = GREATEST(up_time, NOW())
                 WHERE id = $1
                 RETURNING {COLUMNS}"
            );
            sqlx::query_as::<_, Listing>(&query)
                .bind(id)
                .bind(plan.to.as_str())
                .bind(plan.reset_price)
                .fetch_one(&mut *tx)
                .await?
        };

        if plan.clear_forward {
            sqlx::query("DELETE FROM listing_trade_edges WHERE from_listing_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
        if plan.clear_reverse {
            sqlx::query("DELETE FROM listing_trade_edges WHERE to_listing_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
        if plan.purge_comments {
            sqlx::query("DELETE FROM comments WHERE listing_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(listing)
    }

    pub async fn change_description(
        pool: &PgPool,
        id: DbId,
        actor_profile_id: DbId,
        description: &str,
    ) -> Result<Listing, DbError> {
        let mut tx = pool.begin().await?;
        Self::lock_owned(&mut *tx, id, actor_profile_id).await?;
        let query = format!(
            "UPDATE listings SET description = $2, up_time = GREATEST(up_time, NOW())
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let listing = sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(description)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(listing)
    }

    /// Change the price of a `sell` or `buy` listing.
    pub async fn change_price(
        pool: &PgPool,
        id: DbId,
        actor_profile_id: DbId,
        price: Decimal,
    ) -> Result<Listing, DbError> {
        let mut tx = pool.begin().await?;
        let current = Self::lock_owned(&mut *tx, id, actor_profile_id).await?;
        if !current.disposition.is_published() {
            return Err(CoreError::Validation(format!(
                "Only sell and buy listings carry a price; this one is marked {}",
                current.disposition
            ))
            .into());
        }
        let price = validate_price(price)?;
        let query = format!(
            "UPDATE listings SET price = $2, up_time = GREATEST(up_time, NOW())
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let listing = sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(price)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(listing)
    }

    /// Show or hide a listing. Does not touch `up_time`.
    pub async fn set_active(
        pool: &PgPool,
        id: DbId,
        actor_profile_id: DbId,
        active: bool,
    ) -> Result<Listing, DbError> {
        let mut tx = pool.begin().await?;
        Self::lock_owned(&mut *tx, id, actor_profile_id).await?;
        let query = format!("UPDATE listings SET active = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let listing = sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(active)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(listing)
    }

    /// Bump `up_time` to now. It never moves backwards.
    pub async fn touch(pool: &PgPool, id: DbId, actor_profile_id: DbId) -> Result<Listing, DbError> {
        let mut tx = pool.begin().await?;
        Self::lock_owned(&mut *tx, id, actor_profile_id).await?;
        let query = format!(
            "UPDATE listings SET up_time = GREATEST(up_time, NOW())
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let listing = sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(listing)
    }

    // -----------------------------------------------------------------------
    // Trade relation
    // -----------------------------------------------------------------------

    /// The owner's listings on the opposite side, plus the currently selected ids.
    pub async fn trade_choices(
        pool: &PgPool,
        id: DbId,
        actor_profile_id: DbId,
    ) -> Result<TradeChoices, DbError> {
        let listing = Self::find_by_id(pool, id).await?.ok_or(CoreError::NotFound {
            entity: "Listing",
            id,
        })?;
        if listing.profile_id != actor_profile_id {
            return Err(CoreError::not_owner("listing").into());
        }

        let allowed: Vec<String> = Disposition::on_side(listing.disposition.side().opposite())
            .iter()
            .map(|d| d.as_str().to_string())
            .collect();
        let query = format!(
            "{SUMMARY_SELECT}
             WHERE l.profile_id = $1 AND l.id <> $2 AND l.disposition = ANY($3)
             ORDER BY g.name ASC, l.id ASC"
        );
        let choices = sqlx::query_as::<_, ListingSummary>(&query)
            .bind(listing.profile_id)
            .bind(id)
            .bind(&allowed)
            .fetch_all(pool)
            .await?;

        let selected = match EdgeDirection::for_listing(listing.disposition) {
            EdgeDirection::Forward => Self::change_to_ids(pool, id).await?,
            EdgeDirection::Reverse => Self::ready_change_to_ids(pool, id).await?,
        };

        Ok(TradeChoices { choices, selected })
    }

    /// Replace the whole trade set of a listing in one transaction.
    ///
    /// For a `buy`/`wish` listing the set is its `change_to` targets; for a
    /// `keep`/`sell` listing it is the set of want-side listings pointing at
    /// it. Returns the stored target ids, sorted.
    pub async fn replace_trade_targets(
        pool: &PgPool,
        id: DbId,
        actor_profile_id: DbId,
        target_ids: &[DbId],
    ) -> Result<Vec<DbId>, DbError> {
        let target_ids = normalize_target_ids(target_ids);

        let mut lock_ids = target_ids.clone();
        if !lock_ids.contains(&id) {
            lock_ids.push(id);
        }
        lock_ids.sort_unstable();

        // Subject and targets are locked together, in id order.
        let mut tx = pool.begin().await?;
        let rows: Vec<TradeCandidate> = sqlx::query_as::<_, CandidateRow>(
            "SELECT id, profile_id, disposition FROM listings
             WHERE id = ANY($1)
             ORDER BY id
             FOR UPDATE",
        )
        .bind(&lock_ids)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

        let subject = rows
            .iter()
            .find(|row| row.id == id)
            .copied()
            .ok_or(CoreError::NotFound {
                entity: "Listing",
                id,
            })?;
        if subject.profile_id != actor_profile_id {
            return Err(CoreError::not_owner("listing").into());
        }

        if let Some(missing) = target_ids
            .iter()
            .find(|tid| !rows.iter().any(|row| row.id == **tid))
        {
            return Err(CoreError::NotFound {
                entity: "Listing",
                id: *missing,
            }
            .into());
        }

        let targets: Vec<TradeCandidate> = rows
            .into_iter()
            .filter(|row| target_ids.contains(&row.id))
            .collect();
        let direction = validate_trade_targets(&subject, &targets)?;

        let clear = match direction {
            EdgeDirection::Forward => "DELETE FROM listing_trade_edges WHERE from_listing_id = $1",
            EdgeDirection::Reverse => "DELETE FROM listing_trade_edges WHERE to_listing_id = $1",
        };
        sqlx::query(clear).bind(id).execute(&mut *tx).await?;

        if !target_ids.is_empty() {
            let (from_ids, to_ids): (Vec<DbId>, Vec<DbId>) = target_ids
                .iter()
                .map(|tid| edge_for(direction, id, *tid))
                .unzip();
            sqlx::query(
                "INSERT INTO listing_trade_edges (from_listing_id, to_listing_id)
                 SELECT * FROM UNNEST($1::BIGINT[], $2::BIGINT[])",
            )
            .bind(&from_ids)
            .bind(&to_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(target_ids)
    }
}
