//! Port for signing and decoding session tokens.

use crate::domain::{Error, SessionUser, User};

/// Issues bearer tokens at login/registration and decodes them back into a
/// session identity on each request.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Sign a token for `user`.
    fn issue(&self, user: &User) -> Result<String, Error>;

    /// Decode and verify a token. Expired or tampered tokens fail with
    /// `ErrorCode::Unauthenticated`.
    fn decode(&self, token: &str) -> Result<SessionUser, Error>;
}
