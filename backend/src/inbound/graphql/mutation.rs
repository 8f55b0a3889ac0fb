//! Mutation root. Every argument is forwarded as raw input; validation and
//! the login check happen in the domain services.

use async_graphql::{Context, ErrorExtensions, ID, Object, Result};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AddCommentRequest, AddPetRequest, DeleteCommentRequest, LoginRequest, RegisterRequest,
    UpdatePetRequest, UpdateProfileRequest, UpdateStatusRequest,
};

use super::GraphqlPorts;
use super::session::session_user;
use super::types::{AuthObject, PetObject, StatusObject, UserObject};

#[derive(Debug, Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn add_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        email: String,
        #[graphql(secret)] password: String,
    ) -> Result<AuthObject> {
        let ports = ctx.data::<GraphqlPorts>()?;
        let payload = ports
            .accounts
            .register(RegisterRequest {
                username,
                email,
                password: Zeroizing::new(password),
            })
            .await
            .map_err(|err| err.extend())?;
        Ok(payload.into())
    }

    async fn update_user(
        &self,
        ctx: &Context<'_>,
        username: Option<String>,
        email: Option<String>,
        #[graphql(secret)] password: Option<String>,
    ) -> Result<UserObject> {
        let ports = ctx.data::<GraphqlPorts>()?;
        let user = ports
            .accounts
            .update_profile(
                session_user(ctx),
                UpdateProfileRequest {
                    username,
                    email,
                    password: password.map(Zeroizing::new),
                },
            )
            .await
            .map_err(|err| err.extend())?;
        Ok(UserObject::new(user))
    }

    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        #[graphql(secret)] password: String,
    ) -> Result<AuthObject> {
        let ports = ctx.data::<GraphqlPorts>()?;
        let payload = ports
            .accounts
            .login(LoginRequest {
                email,
                password: Zeroizing::new(password),
            })
            .await
            .map_err(|err| err.extend())?;
        Ok(payload.into())
    }

    async fn add_pet(
        &self,
        ctx: &Context<'_>,
        name: String,
        age: Option<i32>,
        gender: Option<String>,
        breed: Option<String>,
    ) -> Result<PetObject> {
        let ports = ctx.data::<GraphqlPorts>()?;
        let pet = ports
            .pets
            .add_pet(
                session_user(ctx),
                AddPetRequest {
                    name,
                    age,
                    gender,
                    breed,
                },
            )
            .await
            .map_err(|err| err.extend())?;
        Ok(PetObject(pet))
    }

    /// Overwrite the supplied fields; `null` when no pet has `petId`.
    async fn update_pet(
        &self,
        ctx: &Context<'_>,
        pet_id: ID,
        name: Option<String>,
        age: Option<i32>,
        gender: Option<String>,
        breed: Option<String>,
    ) -> Result<Option<PetObject>> {
        let ports = ctx.data::<GraphqlPorts>()?;
        let pet = ports
            .pets
            .update_pet(
                session_user(ctx),
                UpdatePetRequest {
                    pet_id: pet_id.0,
                    name,
                    age,
                    gender,
                    breed,
                },
            )
            .await
            .map_err(|err| err.extend())?;
        Ok(pet.map(PetObject))
    }

    async fn delete_pet(&self, ctx: &Context<'_>, pet_id: ID) -> Result<Option<PetObject>> {
        let ports = ctx.data::<GraphqlPorts>()?;
        let pet = ports
            .pets
            .delete_pet(session_user(ctx), &pet_id)
            .await
            .map_err(|err| err.extend())?;
        Ok(pet.map(PetObject))
    }

    /// Create the caller's status, or replace its text if one exists.
    async fn add_status(&self, ctx: &Context<'_>, status_text: String) -> Result<StatusObject> {
        let ports = ctx.data::<GraphqlPorts>()?;
        let status = ports
            .statuses
            .add_status(session_user(ctx), &status_text)
            .await
            .map_err(|err| err.extend())?;
        Ok(StatusObject(status))
    }

    async fn update_status(
        &self,
        ctx: &Context<'_>,
        status_id: ID,
        status_text: String,
    ) -> Result<Option<StatusObject>> {
        let ports = ctx.data::<GraphqlPorts>()?;
        let status = ports
            .statuses
            .update_status(
                session_user(ctx),
                UpdateStatusRequest {
                    status_id: status_id.0,
                    status_text,
                },
            )
            .await
            .map_err(|err| err.extend())?;
        Ok(status.map(StatusObject))
    }

    async fn add_comment(
        &self,
        ctx: &Context<'_>,
        status_id: ID,
        comment_text: String,
    ) -> Result<Option<StatusObject>> {
        let ports = ctx.data::<GraphqlPorts>()?;
        let status = ports
            .statuses
            .add_comment(
                session_user(ctx),
                AddCommentRequest {
                    status_id: status_id.0,
                    comment_text,
                },
            )
            .await
            .map_err(|err| err.extend())?;
        Ok(status.map(StatusObject))
    }

    async fn delete_comment(
        &self,
        ctx: &Context<'_>,
        status_id: ID,
        #[graphql(name = "_id")] comment_id: ID,
    ) -> Result<Option<StatusObject>> {
        let ports = ctx.data::<GraphqlPorts>()?;
        let status = ports
            .statuses
            .delete_comment(
                session_user(ctx),
                DeleteCommentRequest {
                    status_id: status_id.0,
                    comment_id: comment_id.0,
                },
            )
            .await
            .map_err(|err| err.extend())?;
        Ok(status.map(StatusObject))
    }
}
