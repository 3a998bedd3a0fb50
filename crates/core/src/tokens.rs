//! One-time signing link tokens.
//!
//! The plaintext token is handed to the recipient exactly once; only its
//! SHA-256 digest is stored and used for lookup.

use rand::Rng;

use crate::hashing::sha256_hex;

/// Length of a generated token in characters.
pub const TOKEN_LENGTH: usize = 40;

/// A freshly generated signing token.
#[derive(Debug, Clone)]
pub struct GeneratedToken {
    /// The plaintext token (embedded in the signing link, never stored).
    pub plaintext: String,
    /// The SHA-256 hex digest stored in the database.
    pub hash: String,
}

/// Generate a new random URL-safe signing token.
pub fn generate_signing_token() -> GeneratedToken {
    let plaintext: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect();
    let hash = hash_signing_token(&plaintext);
    GeneratedToken { plaintext, hash }
}

/// Digest used to look a token up.
pub fn hash_signing_token(token: &str) -> String {
    sha256_hex(token.as_bytes())
}
