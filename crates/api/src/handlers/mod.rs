pub mod auth;
pub mod catalog;
pub mod comments;
pub mod dialogs;
pub mod games;
pub mod listings;
pub mod places;
pub mod profiles;
