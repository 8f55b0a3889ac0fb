//! Driving port for pet mutations.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{Error, Pet, SessionUser};

/// `addPet` input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPetRequest {
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub breed: Option<String>,
}

/// `updatePet` input; absent fields keep their stored values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePetRequest {
    pub pet_id: String,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub breed: Option<String>,
}

/// Domain use-case port for pet mutations.
///
/// Update and delete resolve to `Ok(None)` when the pet does not exist.
#[async_trait]
pub trait PetCommand: Send + Sync {
    /// Create a pet owned by the session user and link it to them.
    async fn add_pet(
        &self,
        session: Option<&SessionUser>,
        request: AddPetRequest,
    ) -> Result<Pet, Error>;

    async fn update_pet(
        &self,
        session: Option<&SessionUser>,
        request: UpdatePetRequest,
    ) -> Result<Option<Pet>, Error>;

    /// Delete a pet and drop the owner's reference to it.
    async fn delete_pet(
        &self,
        session: Option<&SessionUser>,
        pet_id: &str,
    ) -> Result<Option<Pet>, Error>;
}
