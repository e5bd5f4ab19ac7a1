//! Domain rules for the switchdeck marketplace.
//!
//! Everything in this crate is pure: no database, no HTTP. The repository and
//! API layers call into these modules to decide what a mutation is allowed to
//! do before touching storage.

pub mod catalog;
pub mod comments;
pub mod disposition;
pub mod error;
pub mod market;
pub mod pricing;
pub mod roles;
pub mod search;
pub mod slug;
pub mod trade;
pub mod types;
