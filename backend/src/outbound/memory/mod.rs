//! In-memory document store.
//!
//! Implements the user, pet and status repositories over three `RwLock`ed
//! vectors. Used when no database URL is configured and by the end-to-end
//! tests. Each port call takes one lock, so every mutation is atomic with
//! respect to its collection.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    PetPersistenceError, PetRepository, StatusPersistenceError, StatusRepository,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Comment, CommentId, Pet, PetChanges, PetId, Status, StatusId, User, UserId, UserPatch,
    Username,
};

/// Process-local store backing all three repositories.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<Vec<User>>,
    pets: RwLock<Vec<Pet>>,
    statuses: RwLock<Vec<Status>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> String {
    "store lock poisoned".to_owned()
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, String> {
    lock.read().map_err(poisoned)
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, String> {
    lock.write().map_err(poisoned)
}

/// First unique field of `candidate` already used by another user.
fn taken_field(users: &[User], id: &UserId, username: &Username, email: &str) -> Option<&'static str> {
    let others = || users.iter().filter(move |user| user.id() != id);
    if others().any(|user| user.username() == username) {
        return Some("username");
    }
    if others().any(|user| user.email().as_ref() == email) {
        return Some("email");
    }
    None
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = write(&self.users).map_err(UserPersistenceError::query)?;
        if let Some(field) = taken_field(&users, user.id(), user.username(), user.email().as_ref())
        {
            return Err(UserPersistenceError::duplicate(field));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = read(&self.users).map_err(UserPersistenceError::query)?;
        Ok(users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let users = read(&self.users).map_err(UserPersistenceError::query)?;
        Ok(users
            .iter()
            .find(|user| user.email().as_ref() == email)
            .cloned())
    }

    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut users = write(&self.users).map_err(UserPersistenceError::query)?;
        let Some(index) = users.iter().position(|user| user.id() == id) else {
            return Ok(None);
        };
        let mut updated = users[index].clone();
        updated.apply(patch);
        if let Some(field) =
            taken_field(&users, id, updated.username(), updated.email().as_ref())
        {
            return Err(UserPersistenceError::duplicate(field));
        }
        users[index] = updated.clone();
        Ok(Some(updated))
    }

    async fn push_pet(&self, id: &UserId, pet_id: &PetId) -> Result<(), UserPersistenceError> {
        let mut users = write(&self.users).map_err(UserPersistenceError::query)?;
        if let Some(user) = users.iter_mut().find(|user| user.id() == id) {
            let mut pet_ids = user.pet_ids().to_vec();
            pet_ids.push(*pet_id);
            *user = user.clone().with_pet_ids(pet_ids);
        }
        Ok(())
    }

    async fn pull_pet(&self, pet_id: &PetId) -> Result<(), UserPersistenceError> {
        let mut users = write(&self.users).map_err(UserPersistenceError::query)?;
        for user in users.iter_mut().filter(|user| user.pet_ids().contains(pet_id)) {
            let pet_ids = user
                .pet_ids()
                .iter()
                .copied()
                .filter(|id| id != pet_id)
                .collect();
            *user = user.clone().with_pet_ids(pet_ids);
        }
        Ok(())
    }

    async fn set_status(
        &self,
        id: &UserId,
        status_id: &StatusId,
    ) -> Result<(), UserPersistenceError> {
        let mut users = write(&self.users).map_err(UserPersistenceError::query)?;
        if let Some(user) = users.iter_mut().find(|user| user.id() == id) {
            *user = user.clone().with_status_id(Some(*status_id));
        }
        Ok(())
    }
}

#[async_trait]
impl PetRepository for InMemoryStore {
    async fn create(&self, pet: &Pet) -> Result<(), PetPersistenceError> {
        let mut pets = write(&self.pets).map_err(PetPersistenceError::query)?;
        if pets.iter().any(|stored| stored.id == pet.id) {
            return Err(PetPersistenceError::duplicate("id"));
        }
        pets.push(pet.clone());
        Ok(())
    }

    async fn list(&self, owner: Option<Username>) -> Result<Vec<Pet>, PetPersistenceError> {
        let pets = read(&self.pets).map_err(PetPersistenceError::query)?;
        Ok(pets
            .iter()
            .filter(|pet| owner.as_ref().is_none_or(|owner| &pet.username == owner))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetPersistenceError> {
        let pets = read(&self.pets).map_err(PetPersistenceError::query)?;
        Ok(pets.iter().find(|pet| &pet.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[PetId]) -> Result<Vec<Pet>, PetPersistenceError> {
        let pets = read(&self.pets).map_err(PetPersistenceError::query)?;
        Ok(ids
            .iter()
            .filter_map(|id| pets.iter().find(|pet| &pet.id == id).cloned())
            .collect())
    }

    async fn update(
        &self,
        id: &PetId,
        changes: &PetChanges,
    ) -> Result<Option<Pet>, PetPersistenceError> {
        let mut pets = write(&self.pets).map_err(PetPersistenceError::query)?;
        Ok(pets.iter_mut().find(|pet| &pet.id == id).map(|pet| {
            pet.apply(changes);
            pet.clone()
        }))
    }

    async fn delete(&self, id: &PetId) -> Result<Option<Pet>, PetPersistenceError> {
        let mut pets = write(&self.pets).map_err(PetPersistenceError::query)?;
        Ok(pets
            .iter()
            .position(|pet| &pet.id == id)
            .map(|index| pets.remove(index)))
    }
}

impl InMemoryStore {
    fn mutate_status(
        &self,
        id: &StatusId,
        mutate: impl FnOnce(&mut Status),
    ) -> Result<Option<Status>, StatusPersistenceError> {
        let mut statuses = write(&self.statuses).map_err(StatusPersistenceError::query)?;
        Ok(statuses.iter_mut().find(|status| &status.id == id).map(|status| {
            mutate(status);
            status.clone()
        }))
    }
}

#[async_trait]
impl StatusRepository for InMemoryStore {
    async fn create(&self, status: &Status) -> Result<(), StatusPersistenceError> {
        let mut statuses = write(&self.statuses).map_err(StatusPersistenceError::query)?;
        if statuses.iter().any(|stored| stored.id == status.id) {
            return Err(StatusPersistenceError::duplicate("id"));
        }
        statuses.push(status.clone());
        Ok(())
    }

    async fn list(&self, owner: Option<Username>) -> Result<Vec<Status>, StatusPersistenceError> {
        let statuses = read(&self.statuses).map_err(StatusPersistenceError::query)?;
        Ok(statuses
            .iter()
            .filter(|status| owner.as_ref().is_none_or(|owner| &status.username == owner))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &StatusId) -> Result<Option<Status>, StatusPersistenceError> {
        let statuses = read(&self.statuses).map_err(StatusPersistenceError::query)?;
        Ok(statuses.iter().find(|status| &status.id == id).cloned())
    }

    async fn update_text(
        &self,
        id: &StatusId,
        text: &str,
    ) -> Result<Option<Status>, StatusPersistenceError> {
        self.mutate_status(id, |status| text.clone_into(&mut status.text))
    }

    async fn push_comment(
        &self,
        id: &StatusId,
        comment: &Comment,
    ) -> Result<Option<Status>, StatusPersistenceError> {
        self.mutate_status(id, |status| status.comments.push(comment.clone()))
    }

    async fn pull_comment(
        &self,
        id: &StatusId,
        comment_id: &CommentId,
    ) -> Result<Option<Status>, StatusPersistenceError> {
        self.mutate_status(id, |status| {
            status.remove_comment(comment_id);
        })
    }
}
