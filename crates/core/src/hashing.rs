//! Shared SHA-256 and HMAC-SHA256 hex digest utilities.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Keyed HMAC-SHA256 hex digest. Use for low-entropy values that must not
/// be recoverable by enumerating inputs.
pub fn hmac_sha256_hex(key: &[u8], data: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    format!("{:x}", mac.finalize().into_bytes())
}
