//! HTTP-level integration tests for listings: the disposition workflow,
//! owner checks, search and trade sets.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, post_auth, post_json, post_json_auth, put_json_auth,
};
use sqlx::PgPool;

/// Admin-created place plus a user registered there; returns the user token.
async fn register_in_place(pool: &PgPool, admin: &str, place: &str, username: &str) -> String {
    let body = serde_json::json!({ "name": place });
    let response =
        post_json_auth(common::build_test_app(pool.clone()), "/api/v1/places", body, admin).await;
    let place_id = match response.status() {
        StatusCode::CREATED => body_json(response).await["data"]["id"].as_i64().unwrap(),
        status => panic!("place creation failed with {status}"),
    };

    let body = serde_json::json!({
        "username": username,
        "password": common::TEST_PASSWORD,
        "place_id": place_id,
    });
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/register",
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn me(pool: &PgPool, token: &str) -> serde_json::Value {
    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/me", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn keep_listing_moves_to_sell_list_when_published(pool: PgPool) {
    let admin = common::admin_token(&pool, "admin").await;
    let john = register_in_place(&pool, &admin, "Minsk", "john").await;
    let game = common::create_game(&pool, &admin, "TLOZ").await;
    let listing_id = common::create_listing(&pool, &john, game["id"].as_i64().unwrap()).await;

    let profile = me(&pool, &john).await;
    assert_eq!(profile["place_slug"], "minsk");
    assert_eq!(profile["keep_list"][0]["id"], listing_id);
    assert_eq!(profile["sell_list"], serde_json::json!([]));

    let body = serde_json::json!({
        "disposition": "sell",
        "description": "Cartridge only",
        "price": "10.00",
    });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/lots/{listing_id}/disposition"),
        body,
        &john,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["disposition"], "sell");
    assert_eq!(json["data"]["price"], "10.00");

    let profile = me(&pool, &john).await;
    assert_eq!(profile["keep_list"], serde_json::json!([]));
    assert_eq!(profile["sell_list"][0]["id"], listing_id);

    let response = get(common::build_test_app(pool.clone()), "/api/v1/games/tloz").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["sell_count"], 1);
    assert_eq!(json["data"]["sell_list"][0]["username"], "john");

    let response = get(common::build_test_app(pool), "/api/v1/places/minsk").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["sell_list"][0]["id"], listing_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn publishing_without_terms_returns_400(pool: PgPool) {
    let admin = common::admin_token(&pool, "admin").await;
    let john = common::register(&pool, "john").await;
    let game = common::create_game(&pool, &admin, "TLOZ").await;
    let listing_id = common::create_listing(&pool, &john, game["id"].as_i64().unwrap()).await;

    let body = serde_json::json!({ "disposition": "buy" });
    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/lots/{listing_id}/disposition"),
        body,
        &john,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_owner_cannot_delete_listing(pool: PgPool) {
    let admin = common::admin_token(&pool, "admin").await;
    let john = common::register(&pool, "john").await;
    let mallory = common::register(&pool, "mallory").await;
    let game = common::create_game(&pool, &admin, "TLOZ").await;
    let listing_id = common::create_listing(&pool, &john, game["id"].as_i64().unwrap()).await;

    let uri = format!("/api/v1/lots/{listing_id}");
    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &mallory).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &john).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_account_cannot_mutate_with_live_token(pool: PgPool) {
    let admin = common::admin_token(&pool, "admin").await;
    let john = common::register(&pool, "john").await;
    let game = common::create_game(&pool, &admin, "TLOZ").await;
    let game_id = game["id"].as_i64().unwrap();
    let listing_id = common::create_listing(&pool, &john, game_id).await;

    sqlx::query("UPDATE users SET is_active = FALSE WHERE username = 'john'")
        .execute(&pool)
        .await
        .unwrap();

    let body = serde_json::json!({ "game_id": game_id });
    let response =
        post_json_auth(common::build_test_app(pool.clone()), "/api/v1/lots", body, &john).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let uri = format!("/api/v1/lots/{listing_id}");
    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &john).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get(common::build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_reports_unknown_game_name(pool: PgPool) {
    let response = get(
        common::build_test_app(pool),
        "/api/v1/lots/search?game=Nonexistent&proposition=sell",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["listings"], serde_json::json!([]));
    assert_eq!(json["data"]["no_game"], "Nonexistent");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_with_bad_proposition_returns_400(pool: PgPool) {
    let response = get(
        common::build_test_app(pool),
        "/api/v1/lots/search?proposition=swap",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn trade_set_links_wish_to_keep(pool: PgPool) {
    let admin = common::admin_token(&pool, "admin").await;
    let john = common::register(&pool, "john").await;
    let bob = common::register(&pool, "bob").await;
    let tloz = common::create_game(&pool, &admin, "TLOZ").await;
    let mario = common::create_game(&pool, &admin, "Mario Kart").await;

    let keep_id = common::create_listing(&pool, &john, tloz["id"].as_i64().unwrap()).await;
    let body = serde_json::json!({
        "game_id": mario["id"],
        "disposition": "wish",
    });
    let response =
        post_json_auth(common::build_test_app(pool.clone()), "/api/v1/lots", body, &john).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let wish_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/lots/{wish_id}/change-to"),
        serde_json::json!({ "listing_ids": [keep_id, keep_id] }),
        &john,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], serde_json::json!([keep_id]));

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/lots/{keep_id}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["ready_change_to"], serde_json::json!([wish_id]));

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/lots/{wish_id}/change-to"),
        &john,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["selected"], serde_json::json!([keep_id]));

    // Another profile's listing can never be a trade target.
    let bob_keep = common::create_listing(&pool, &bob, tloz["id"].as_i64().unwrap()).await;
    let response = put_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/lots/{wish_id}/change-to"),
        serde_json::json!({ "listing_ids": [bob_keep] }),
        &john,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn touch_requires_ownership(pool: PgPool) {
    let admin = common::admin_token(&pool, "admin").await;
    let john = common::register(&pool, "john").await;
    let bob = common::register(&pool, "bob").await;
    let game = common::create_game(&pool, &admin, "TLOZ").await;
    let listing_id = common::create_listing(&pool, &john, game["id"].as_i64().unwrap()).await;

    let uri = format!("/api/v1/lots/{listing_id}/touch");
    let response = post_auth(common::build_test_app(pool.clone()), &uri, &bob).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_auth(common::build_test_app(pool), &uri, &john).await;
    assert_eq!(response.status(), StatusCode::OK);
}
