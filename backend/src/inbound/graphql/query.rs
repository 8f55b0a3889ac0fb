//! Query root: `me`, `pets` and `status`.

use async_graphql::{Context, ErrorExtensions, Object, Result};

use super::GraphqlPorts;
use super::session::session_user;
use super::types::{PetObject, StatusObject, UserObject};

#[derive(Debug, Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The logged-in user with pets and status populated.
    async fn me(&self, ctx: &Context<'_>) -> Result<UserObject> {
        let ports = ctx.data::<GraphqlPorts>()?;
        let profile = ports
            .account_query
            .me(session_user(ctx))
            .await
            .map_err(|err| err.extend())?;
        Ok(UserObject::populated(profile))
    }

    /// All pets, or only those owned by `username`.
    async fn pets(&self, ctx: &Context<'_>, username: Option<String>) -> Result<Vec<PetObject>> {
        let ports = ctx.data::<GraphqlPorts>()?;
        let pets = ports
            .pet_query
            .pets(username.as_deref())
            .await
            .map_err(|err| err.extend())?;
        Ok(pets.into_iter().map(PetObject).collect())
    }

    /// All statuses, or only those posted by `username`.
    async fn status(
        &self,
        ctx: &Context<'_>,
        username: Option<String>,
    ) -> Result<Vec<StatusObject>> {
        let ports = ctx.data::<GraphqlPorts>()?;
        let statuses = ports
            .status_query
            .statuses(username.as_deref())
            .await
            .map_err(|err| err.extend())?;
        Ok(statuses.into_iter().map(StatusObject).collect())
    }
}
