//! Session tokens.
//!
//! Raw tokens are handed to the client once; only their SHA-256 digest is
//! stored.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Prefix identifying storefront session tokens.
pub const SESSION_TOKEN_PREFIX: &str = "sf_";

/// Generate a new random session token.
#[must_use]
pub fn generate_session_token() -> String {
    format!(
        "{SESSION_TOKEN_PREFIX}{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}

/// Hex SHA-256 digest of a raw token.
#[must_use]
pub fn hash_session_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
