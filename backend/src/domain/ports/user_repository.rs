//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{PetId, StatusId, User, UserId, UserPatch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique field (`username` or `email`) is already taken.
        Duplicate { field: String } => "user {field} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with `Duplicate` on a taken username or
    /// email.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by canonical (lower-cased) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Apply a profile patch and return the stored result, or `None` when
    /// the user does not exist.
    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Append a pet reference to the user's pet list.
    async fn push_pet(&self, id: &UserId, pet_id: &PetId) -> Result<(), UserPersistenceError>;

    /// Remove a pet reference from whichever user holds it.
    async fn pull_pet(&self, pet_id: &PetId) -> Result<(), UserPersistenceError>;

    /// Point the user's status reference at `status_id`.
    async fn set_status(
        &self,
        id: &UserId,
        status_id: &StatusId,
    ) -> Result<(), UserPersistenceError>;
}
