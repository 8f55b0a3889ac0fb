//! HS256 bearer tokens carrying the caller's id, username and email.
//!
//! Claims layout:
//! `{"data": {"_id": "...", "username": "...", "email": "..."}, "iat": 0, "exp": 0}`.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::TokenIssuer;
use crate::domain::{Error, SessionUser, User, UserId, Username};

/// Token lifetime used when no override is configured.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(2 * 60 * 60);

#[derive(Debug, Serialize, Deserialize)]
struct TokenData {
    #[serde(rename = "_id")]
    id: String,
    username: String,
    email: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    data: TokenData,
    iat: i64,
    exp: i64,
}

/// Signs and verifies session tokens with a shared secret.
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenIssuer {
    /// Build an issuer from raw secret bytes.
    pub fn new(secret: Zeroizing<Vec<u8>>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);
        Self {
            encoding: EncodingKey::from_secret(&secret),
            decoding: DecodingKey::from_secret(&secret),
            validation,
            ttl,
            clock,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &User) -> Result<String, Error> {
        let iat = self.clock.utc().timestamp();
        let ttl = i64::try_from(self.ttl.as_secs())
            .map_err(|_| Error::internal("token lifetime out of range"))?;
        let claims = Claims {
            data: TokenData {
                id: user.id().to_string(),
                username: user.username().to_string(),
                email: user.email().to_string(),
            },
            iat,
            exp: iat.saturating_add(ttl),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| Error::internal(format!("failed to sign token: {err}")))
    }

    fn decode(&self, token: &str) -> Result<SessionUser, Error> {
        let invalid = || Error::unauthenticated("Invalid or expired token");
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| {
                debug!(error = %err, "rejected bearer token");
                invalid()
            })?
            .claims;
        let id = UserId::new(&claims.data.id).map_err(|_| invalid())?;
        let username = Username::new(&claims.data.username).map_err(|_| invalid())?;
        Ok(SessionUser::new(id, username))
    }
}
