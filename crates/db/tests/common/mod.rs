//! Seeding helpers shared by the repository integration tests.

#![allow(dead_code)]

use rust_decimal::Decimal;
use sqlx::PgPool;
use switchdeck_core::disposition::Disposition;
use switchdeck_core::roles::ROLE_USER;
use switchdeck_core::slug::generate_slug;
use switchdeck_db::models::game::{CreateGame, Game};
use switchdeck_db::models::listing::{CreateListing, Listing};
use switchdeck_db::models::place::{CreatePlace, Place};
use switchdeck_db::models::profile::Profile;
use switchdeck_db::models::user::CreateUser;
use switchdeck_db::repositories::{GameRepo, ListingRepo, PlaceRepo, UserRepo};

/// Id of the place seeded by the migrations.
pub const DEFAULT_PLACE_ID: i64 = 1;

pub async fn seed_place(pool: &PgPool, name: &str) -> Place {
    let input = CreatePlace {
        name: name.to_string(),
        slug: None,
        popularity: 0,
    };
    PlaceRepo::create(pool, &input, &generate_slug(name, 20))
        .await
        .unwrap()
}

pub async fn seed_profile(pool: &PgPool, username: &str, place_id: i64) -> Profile {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "not-a-real-hash".to_string(),
        role: ROLE_USER.to_string(),
    };
    let (_, profile) = UserRepo::create_with_profile(pool, &input, place_id)
        .await
        .unwrap();
    profile
}

pub async fn seed_game(pool: &PgPool, name: &str) -> Game {
    let input = CreateGame {
        name: name.to_string(),
        slug: None,
        cover: None,
        description: String::new(),
        eshop_url: None,
    };
    GameRepo::create(pool, &input, &generate_slug(name, 30))
        .await
        .unwrap()
}

pub async fn seed_listing(
    pool: &PgPool,
    profile_id: i64,
    game_id: i64,
    disposition: Disposition,
    price: &str,
) -> Listing {
    let input = CreateListing {
        game_id,
        description: Some(format!("{disposition} listing")),
        disposition: Some(disposition),
        price: Some(price.parse::<Decimal>().unwrap()),
    };
    ListingRepo::create(pool, profile_id, &input).await.unwrap()
}
