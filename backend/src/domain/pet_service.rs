//! Pet domain service.
//!
//! Every mutation checks the session first, then validates input, then
//! touches the store. Ownership is only verified under
//! [`OwnershipPolicy::Enforced`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::ports::{
    AddPetRequest, PetCommand, PetQuery, PetRepository, UpdatePetRequest, UserRepository,
};
use super::service_support::{OwnerFilter, map_pet_error, map_user_error, parse_id};
use super::{
    Error, OwnershipPolicy, Pet, PetChanges, PetDraft, PetId, SessionUser, require_session,
};

/// Pet service implementing [`PetCommand`] and [`PetQuery`].
#[derive(Clone)]
pub struct PetService<P, U> {
    pets: Arc<P>,
    users: Arc<U>,
    ownership: OwnershipPolicy,
}

impl<P, U> PetService<P, U> {
    pub fn new(pets: Arc<P>, users: Arc<U>, ownership: OwnershipPolicy) -> Self {
        Self {
            pets,
            users,
            ownership,
        }
    }
}

impl<P, U> PetService<P, U>
where
    P: PetRepository,
    U: UserRepository,
{
    /// Under `Enforced`, load the pet and check the caller owns it.
    /// Returns `false` when the pet does not exist.
    async fn authorise(&self, session: &SessionUser, id: &PetId) -> Result<bool, Error> {
        if self.ownership == OwnershipPolicy::Unchecked {
            return Ok(true);
        }
        let Some(pet) = self.pets.find_by_id(id).await.map_err(map_pet_error)? else {
            return Ok(false);
        };
        self.ownership
            .ensure_owner(session, &pet.username, "pets")?;
        Ok(true)
    }
}

#[async_trait]
impl<P, U> PetCommand for PetService<P, U>
where
    P: PetRepository,
    U: UserRepository,
{
    async fn add_pet(
        &self,
        session: Option<&SessionUser>,
        request: AddPetRequest,
    ) -> Result<Pet, Error> {
        let session = require_session(session)?;
        let draft = PetDraft::try_from_parts(
            &request.name,
            request.age,
            request.gender.as_deref(),
            request.breed.as_deref(),
        )
        .map_err(|err| Error::invalid_field(err.field(), err))?;

        let pet = Pet::from_draft(PetId::random(), draft, session.username().clone());
        self.pets.create(&pet).await.map_err(map_pet_error)?;
        self.users
            .push_pet(session.id(), &pet.id)
            .await
            .map_err(map_user_error)?;
        info!(pet_id = %pet.id, owner = %pet.username, "added pet");
        Ok(pet)
    }

    async fn update_pet(
        &self,
        session: Option<&SessionUser>,
        request: UpdatePetRequest,
    ) -> Result<Option<Pet>, Error> {
        let session = require_session(session)?;
        let id: PetId = parse_id(&request.pet_id, "petId")?;
        let changes = PetChanges::try_from_parts(
            request.name.as_deref(),
            request.age,
            request.gender.as_deref(),
            request.breed.as_deref(),
        )
        .map_err(|err| Error::invalid_field(err.field(), err))?;

        if !self.authorise(session, &id).await? {
            return Ok(None);
        }
        self.pets.update(&id, &changes).await.map_err(map_pet_error)
    }

    async fn delete_pet(
        &self,
        session: Option<&SessionUser>,
        pet_id: &str,
    ) -> Result<Option<Pet>, Error> {
        let session = require_session(session)?;
        let id: PetId = parse_id(pet_id, "petId")?;

        if !self.authorise(session, &id).await? {
            return Ok(None);
        }
        let Some(pet) = self.pets.delete(&id).await.map_err(map_pet_error)? else {
            return Ok(None);
        };
        self.users.pull_pet(&pet.id).await.map_err(map_user_error)?;
        info!(pet_id = %pet.id, by = %session.username(), "deleted pet");
        Ok(Some(pet))
    }
}

#[async_trait]
impl<P, U> PetQuery for PetService<P, U>
where
    P: PetRepository,
    U: UserRepository,
{
    async fn pets(&self, username: Option<&str>) -> Result<Vec<Pet>, Error> {
        match OwnerFilter::parse(username) {
            OwnerFilter::All => self.pets.list(None).await.map_err(map_pet_error),
            OwnerFilter::Only(owner) => self.pets.list(Some(owner)).await.map_err(map_pet_error),
            OwnerFilter::Nothing => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
#[path = "pet_service_tests.rs"]
mod tests;
