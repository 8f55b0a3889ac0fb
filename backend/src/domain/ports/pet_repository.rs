//! Port abstraction for pet persistence adapters.
use async_trait::async_trait;

use crate::domain::{Pet, PetChanges, PetId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by pet repository adapters.
    pub enum PetPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "pet repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "pet repository query failed: {message}",
        /// A unique constraint was violated.
        Duplicate { field: String } => "pet {field} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn create(&self, pet: &Pet) -> Result<(), PetPersistenceError>;

    /// List pets, optionally only those owned by `owner`. Order follows
    /// insertion.
    async fn list(&self, owner: Option<Username>) -> Result<Vec<Pet>, PetPersistenceError>;

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetPersistenceError>;

    /// Fetch the pets behind a user's reference list, in reference order.
    /// Dangling references are skipped.
    async fn find_by_ids(&self, ids: &[PetId]) -> Result<Vec<Pet>, PetPersistenceError>;

    /// Overwrite the supplied fields; `None` when no pet has this id.
    async fn update(
        &self,
        id: &PetId,
        changes: &PetChanges,
    ) -> Result<Option<Pet>, PetPersistenceError>;

    /// Remove a pet and return it; `None` when no pet has this id.
    async fn delete(&self, id: &PetId) -> Result<Option<Pet>, PetPersistenceError>;
}
