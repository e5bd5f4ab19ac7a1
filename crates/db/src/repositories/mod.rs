//! Repository layer: one zero-sized struct per table (or table family).

pub mod catalog_repo;
pub mod comment_repo;
pub mod dialog_repo;
pub mod game_repo;
pub mod listing_repo;
pub mod place_repo;
pub mod profile_repo;
pub mod user_repo;

pub use catalog_repo::{CatalogLinkRepo, CatalogRepo, ParseResultRepo};
pub use comment_repo::CommentRepo;
pub use dialog_repo::DialogRepo;
pub use game_repo::GameRepo;
pub use listing_repo::ListingRepo;
pub use place_repo::PlaceRepo;
pub use profile_repo::ProfileRepo;
pub use user_repo::UserRepo;
