//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the authenticated user from a JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- same, but anonymous requests are allowed.
//! - [`auth::CurrentProfile`] -- the authenticated user's marketplace profile.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.

pub mod auth;
pub mod rbac;
