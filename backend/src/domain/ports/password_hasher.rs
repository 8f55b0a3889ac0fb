//! Port for one-way password hashing.

use crate::domain::{Error, PasswordHash};

/// Hashes new passwords and verifies login attempts.
///
/// Implementations are CPU bound and synchronous.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password with a fresh salt.
    fn hash(&self, password: &str) -> Result<PasswordHash, Error>;

    /// Check `password` against a stored hash. A mismatch is `Ok(false)`;
    /// `Err` is reserved for malformed hashes and hasher failures.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, Error>;
}
