//! Driving port for reading the current account.

use async_trait::async_trait;

use crate::domain::{Error, Pet, SessionUser, Status, User};

/// A user with its pet and status references resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user: User,
    pub pets: Vec<Pet>,
    pub status: Option<Status>,
}

/// Domain use-case port for account reads.
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Load the session user with pets and status populated.
    async fn me(&self, session: Option<&SessionUser>) -> Result<Profile, Error>;

    /// Resolve the pet and status references of an already loaded user.
    async fn populate(&self, user: User) -> Result<Profile, Error>;
}
