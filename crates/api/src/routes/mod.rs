pub mod auth;
pub mod catalog;
pub mod comments;
pub mod dialogs;
pub mod games;
pub mod health;
pub mod listings;
pub mod places;
pub mod profiles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                               register (public)
/// /auth/login                                  login (public)
///
/// /me                                          get, delete own account
/// /me/place                                    change own place
/// /profiles/{username}                         public profile page
///
/// /places                                      list, create (admin)
/// /places/{slug}                               place page
/// /places/id/{id}                              update, delete (admin)
///
/// /games                                       list, create (admin)
/// /games/ranked                                games by live sell offers
/// /games/{slug}                                game page
/// /games/{slug}/sell                           paged sell offers
/// /games/{slug}/buy                            paged buy offers
/// /games/id/{id}                               update, delete (admin)
///
/// /lots                                        list, create
/// /lots/search                                 search by game, place, proposition
/// /lots/{id}                                   get, delete
/// /lots/{id}/disposition                       move between keep/wish/sell/buy
/// /lots/{id}/description                       change description
/// /lots/{id}/price                             change price
/// /lots/{id}/active                            hide or show
/// /lots/{id}/touch                             bump
/// /lots/{id}/change-to                         trade set
/// /lots/{id}/comments                          list, add
///
/// /comments/{id}                               delete (author)
/// /comments/{id}/permalink                     page-aware link
///
/// /catalogs                                    list, create (admin)
/// /catalogs/{id}                               update, delete (admin)
/// /catalog-links                               list by game, create (admin)
/// /catalog-links/{id}                          update, delete (admin)
/// /catalog-links/{id}/results                  parse history
/// /catalog-links/{id}/parse                    parse now (admin)
///
/// /dialogs                                     list, open
/// /dialogs/{id}/messages                       list, send (participants)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/me", profiles::me_router())
        .nest("/profiles", profiles::router())
        .nest("/places", places::router())
        .nest("/games", games::router())
        // Listings and their comments.
        .nest("/lots", listings::router())
        .nest("/comments", comments::router())
        // Price tracking.
        .nest("/catalogs", catalog::catalogs_router())
        .nest("/catalog-links", catalog::links_router())
        .nest("/dialogs", dialogs::router())
}
