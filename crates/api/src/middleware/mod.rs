//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller's identity, from the session cookie or a Bearer token.
//! - [`rbac::RequireAdmin`] -- `admin` or `master`.
//! - [`rbac::RequireAffiliate`] -- `affiliate`.
//! - [`rbac::RequireAuth`] -- any authenticated user.

pub mod auth;
pub mod rbac;
