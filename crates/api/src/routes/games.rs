//! Route definitions for the `/games` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::games;
use crate::state::AppState;

/// Routes mounted at `/games`.
///
/// ```text
/// GET    /              -> list_games
/// POST   /              -> create_game (admin only)
/// GET    /ranked        -> ranked_games
/// GET    /{slug}        -> get_game
/// GET    /{slug}/sell   -> game_sell_list
/// GET    /{slug}/buy    -> game_buy_list
/// PUT    /id/{id}       -> update_game (admin only)
/// DELETE /id/{id}       -> delete_game (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(games::list_games).post(games::create_game))
        .route("/ranked", get(games::ranked_games))
        .route("/{slug}", get(games::get_game))
        .route("/{slug}/sell", get(games::game_sell_list))
        .route("/{slug}/buy", get(games::game_buy_list))
        .route("/id/{id}", put(games::update_game).delete(games::delete_game))
}
