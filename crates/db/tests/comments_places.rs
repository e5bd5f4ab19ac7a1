//! Comments, places, games and profiles against a real database.

mod common;

use assert_matches::assert_matches;
use sqlx::PgPool;
use switchdeck_core::disposition::Disposition;
use switchdeck_core::error::CoreError;
use switchdeck_db::models::place::{CreatePlace, UpdatePlace};
use switchdeck_db::repositories::{
    CommentRepo, GameRepo, ListingRepo, PlaceRepo, ProfileRepo, UserRepo,
};
use switchdeck_db::DbError;

use common::{seed_game, seed_listing, seed_place, seed_profile, DEFAULT_PLACE_ID};

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn comment_touches_listing(pool: PgPool) {
    let owner = seed_profile(&pool, "ann", DEFAULT_PLACE_ID).await;
    let game = seed_game(&pool, "Kirby").await;
    let listing = seed_listing(&pool, owner.id, game.id, Disposition::Sell, "10.00").await;

    CommentRepo::create(&pool, listing.id, owner.id, "Bump")
        .await
        .unwrap();

    let after = ListingRepo::find_by_id(&pool, listing.id)
        .await
        .unwrap()
        .unwrap();
    assert!(after.up_time >= listing.up_time);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn comment_on_missing_listing_is_not_found(pool: PgPool) {
    let author = seed_profile(&pool, "ann", DEFAULT_PLACE_ID).await;
    assert_matches!(
        CommentRepo::create(&pool, 777, author.id, "hello").await,
        Err(DbError::Core(CoreError::NotFound { entity: "Listing", id: 777 }))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn comments_are_paged_oldest_first_with_permalinks(pool: PgPool) {
    let owner = seed_profile(&pool, "ann", DEFAULT_PLACE_ID).await;
    let game = seed_game(&pool, "Kirby").await;
    let listing = seed_listing(&pool, owner.id, game.id, Disposition::Sell, "10.00").await;

    let mut created = Vec::new();
    for n in 0..12 {
        let comment = CommentRepo::create(&pool, listing.id, owner.id, &format!("comment {n}"))
            .await
            .unwrap();
        created.push(comment);
    }

    let first = CommentRepo::list_for_listing(&pool, listing.id, 10, 0)
        .await
        .unwrap();
    assert_eq!(first.len(), 10);
    assert_eq!(first[0].text, "comment 0");
    assert_eq!(first[0].author_username, "ann");
    let second = CommentRepo::list_for_listing(&pool, listing.id, 10, 10)
        .await
        .unwrap();
    assert_eq!(second.len(), 2);
    assert_eq!(second[1].text, "comment 11");
    assert_eq!(CommentRepo::count_for_listing(&pool, listing.id).await.unwrap(), 12);

    let eleventh = &created[10];
    assert_eq!(CommentRepo::position(&pool, eleventh).await.unwrap(), 10);
    assert_eq!(
        CommentRepo::permalink(&pool, eleventh, None, 10).await.unwrap(),
        format!("/lots/{}?page=2#comment_{}", listing.id, eleventh.id)
    );
    assert_eq!(
        CommentRepo::permalink(&pool, &created[0], None, 10)
            .await
            .unwrap(),
        format!("/lots/{}#comment_{}", listing.id, created[0].id)
    );
    assert_eq!(
        CommentRepo::permalink(&pool, eleventh, Some(5), 10)
            .await
            .unwrap(),
        format!(
            "/lots/{}?page=3&objects-per-page=5#comment_{}",
            listing.id, eleventh.id
        )
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_author_deletes_comment(pool: PgPool) {
    let owner = seed_profile(&pool, "ann", DEFAULT_PLACE_ID).await;
    let author = seed_profile(&pool, "bob", DEFAULT_PLACE_ID).await;
    let game = seed_game(&pool, "Kirby").await;
    let listing = seed_listing(&pool, owner.id, game.id, Disposition::Sell, "10.00").await;
    let comment = CommentRepo::create(&pool, listing.id, author.id, "Interested")
        .await
        .unwrap();

    // Not even the listing owner may remove someone else's comment.
    assert_matches!(
        CommentRepo::delete_by_author(&pool, comment.id, owner.id).await,
        Err(DbError::Core(CoreError::Forbidden(_)))
    );
    CommentRepo::delete_by_author(&pool, comment.id, author.id)
        .await
        .unwrap();
    assert!(CommentRepo::find_by_id(&pool, comment.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Places
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn places_ordered_by_popularity_then_name(pool: PgPool) {
    let mut brest = seed_place(&pool, "Brest").await;
    let gomel = seed_place(&pool, "Gomel").await;
    let minsk = seed_place(&pool, "Minsk").await;
    brest = PlaceRepo::update(
        &pool,
        brest.id,
        &UpdatePlace {
            name: None,
            slug: None,
            popularity: Some(5),
        },
    )
    .await
    .unwrap()
    .unwrap();

    let names: Vec<String> = PlaceRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Brest", "Anywhere", "Gomel", "Minsk"]);
    assert_eq!(brest.popularity, 5);
    assert_ne!(gomel.id, minsk.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_place_name_violates_unique_constraint(pool: PgPool) {
    seed_place(&pool, "Minsk").await;
    let input = CreatePlace {
        name: "Minsk".to_string(),
        slug: Some("minsk-2".to_string()),
        popularity: 0,
    };
    let err = PlaceRepo::create(&pool, &input, "minsk-2")
        .await
        .unwrap_err();
    let constraint = err
        .as_database_error()
        .and_then(|e| e.constraint().map(str::to_string));
    assert_eq!(constraint.as_deref(), Some("uq_places_name"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_place_moves_profiles_to_default(pool: PgPool) {
    let minsk = seed_place(&pool, "Minsk").await;
    let john = seed_profile(&pool, "john", minsk.id).await;

    assert!(PlaceRepo::delete_reassigning(&pool, minsk.id, DEFAULT_PLACE_ID)
        .await
        .unwrap());

    let moved = ProfileRepo::find_by_id(&pool, john.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.place_id, DEFAULT_PLACE_ID);
    assert!(PlaceRepo::find_by_id(&pool, minsk.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn default_place_cannot_be_deleted(pool: PgPool) {
    assert_matches!(
        PlaceRepo::delete_reassigning(&pool, DEFAULT_PLACE_ID, DEFAULT_PLACE_ID).await,
        Err(DbError::Core(CoreError::Conflict(_)))
    );
    assert!(!PlaceRepo::delete_reassigning(&pool, 4242, DEFAULT_PLACE_ID)
        .await
        .unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn place_page_lists_active_offers_of_local_profiles(pool: PgPool) {
    let minsk = seed_place(&pool, "Minsk").await;
    let john = seed_profile(&pool, "john", minsk.id).await;
    let ann = seed_profile(&pool, "ann", DEFAULT_PLACE_ID).await;
    let game = seed_game(&pool, "TLOZ").await;
    let local = seed_listing(&pool, john.id, game.id, Disposition::Sell, "10.00").await;
    seed_listing(&pool, ann.id, game.id, Disposition::Sell, "10.00").await;

    let sells = ListingRepo::active_in_place(&pool, minsk.id, Disposition::Sell)
        .await
        .unwrap();
    assert_eq!(sells.iter().map(|l| l.id).collect::<Vec<_>>(), vec![local.id]);
    assert!(ListingRepo::active_in_place(&pool, minsk.id, Disposition::Buy)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Games and profiles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_game_cascades_to_listings(pool: PgPool) {
    let ann = seed_profile(&pool, "ann", DEFAULT_PLACE_ID).await;
    let game = seed_game(&pool, "Kirby").await;
    let listing = seed_listing(&pool, ann.id, game.id, Disposition::Keep, "0").await;

    assert!(GameRepo::delete(&pool, game.id).await.unwrap());
    assert!(ListingRepo::find_by_id(&pool, listing.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_user_cascades_to_profile_listings_and_comments(pool: PgPool) {
    let ann = seed_profile(&pool, "ann", DEFAULT_PLACE_ID).await;
    let bob = seed_profile(&pool, "bob", DEFAULT_PLACE_ID).await;
    let game = seed_game(&pool, "Kirby").await;
    let listing = seed_listing(&pool, ann.id, game.id, Disposition::Sell, "10.00").await;
    let bob_listing = seed_listing(&pool, bob.id, game.id, Disposition::Sell, "10.00").await;
    let comment = CommentRepo::create(&pool, bob_listing.id, ann.id, "Trade?")
        .await
        .unwrap();

    assert!(UserRepo::delete(&pool, ann.user_id).await.unwrap());

    assert!(ProfileRepo::find_by_id(&pool, ann.id).await.unwrap().is_none());
    assert!(ListingRepo::find_by_id(&pool, listing.id)
        .await
        .unwrap()
        .is_none());
    assert!(CommentRepo::find_by_id(&pool, comment.id)
        .await
        .unwrap()
        .is_none());
    assert!(ListingRepo::find_by_id(&pool, bob_listing.id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_view_joins_user_and_place(pool: PgPool) {
    let minsk = seed_place(&pool, "Minsk").await;
    let john = seed_profile(&pool, "john", minsk.id).await;

    let view = ProfileRepo::find_view_by_username(&pool, "john")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.id, john.id);
    assert_eq!(view.place_slug, "minsk");

    let moved = ProfileRepo::update_place(&pool, john.id, DEFAULT_PLACE_ID)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.place_id, DEFAULT_PLACE_ID);
}
