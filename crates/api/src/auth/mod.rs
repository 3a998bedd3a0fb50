//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- access-token signing and refresh-token helpers.
//! - [`cookies`] -- `HttpOnly` session cookies carrying both tokens.

pub mod cookies;
pub mod jwt;
pub mod password;
