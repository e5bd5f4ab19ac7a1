pub mod catalog;
pub mod comment;
pub mod dialog;
pub mod game;
pub mod listing;
pub mod place;
pub mod profile;
pub mod user;
