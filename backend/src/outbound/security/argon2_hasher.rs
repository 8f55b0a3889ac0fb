//! Argon2id implementation of the `PasswordHasher` port.

use argon2::Argon2;
use argon2::password_hash::{
    self, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use rand::rngs::OsRng;

use crate::domain::ports::PasswordHasher;
use crate::domain::{Error, PasswordHash};

/// Hashes with the crate's default Argon2id parameters and a random salt.
#[derive(Debug, Default, Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| Error::internal(format!("password hashing failed: {err}")))?;
        Ok(PasswordHash::from_encoded(hash.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, Error> {
        let parsed = PhcHash::new(hash.as_str())
            .map_err(|err| Error::internal(format!("stored password hash is malformed: {err}")))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(Error::internal(format!(
                "password verification failed: {err}"
            ))),
        }
    }
}
