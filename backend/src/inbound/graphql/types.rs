//! GraphQL output types wrapping the stored documents.

use async_graphql::{Context, ErrorExtensions, ID, Object, Result, SimpleObject};
use tokio::sync::OnceCell;

use crate::domain::ports::Profile;
use crate::domain::{AuthPayload, Comment, Pet, Status, User};

use super::GraphqlPorts;

fn count(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

/// `User` with lazily populated pet and status references.
pub struct UserObject {
    user: User,
    profile: OnceCell<Profile>,
}

impl UserObject {
    /// Wrap a bare user; `pets` and `status` are fetched on first access.
    pub fn new(user: User) -> Self {
        Self {
            user,
            profile: OnceCell::new(),
        }
    }

    /// Wrap an already populated profile.
    pub fn populated(profile: Profile) -> Self {
        Self {
            user: profile.user.clone(),
            profile: OnceCell::new_with(Some(profile)),
        }
    }

    async fn profile(&self, ctx: &Context<'_>) -> Result<&Profile> {
        self.profile
            .get_or_try_init(|| async {
                let ports = ctx.data::<GraphqlPorts>()?;
                ports
                    .account_query
                    .populate(self.user.clone())
                    .await
                    .map_err(|err| err.extend())
            })
            .await
    }
}

#[Object(name = "User")]
impl UserObject {
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.user.id().to_string())
    }

    async fn username(&self) -> &str {
        self.user.username().as_ref()
    }

    async fn email(&self) -> &str {
        self.user.email().as_ref()
    }

    async fn pets(&self, ctx: &Context<'_>) -> Result<Vec<PetObject>> {
        let profile = self.profile(ctx).await?;
        Ok(profile.pets.iter().cloned().map(PetObject).collect())
    }

    async fn status(&self, ctx: &Context<'_>) -> Result<Option<StatusObject>> {
        if self.user.status_id().is_none() {
            return Ok(None);
        }
        let profile = self.profile(ctx).await?;
        Ok(profile.status.clone().map(StatusObject))
    }

    /// Number of pets referenced by the user.
    async fn pet_count(&self) -> i32 {
        count(self.user.pet_ids().len())
    }
}

pub struct PetObject(pub Pet);

#[Object(name = "Pet")]
impl PetObject {
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn age(&self) -> Option<i32> {
        self.0.age
    }

    async fn gender(&self) -> Option<&str> {
        self.0.gender.as_deref()
    }

    async fn breed(&self) -> Option<&str> {
        self.0.breed.as_deref()
    }

    async fn username(&self) -> &str {
        self.0.username.as_ref()
    }
}

pub struct StatusObject(pub Status);

#[Object(name = "Status")]
impl StatusObject {
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn status_text(&self) -> &str {
        &self.0.text
    }

    async fn username(&self) -> &str {
        self.0.username.as_ref()
    }

    /// RFC 3339 creation time.
    async fn created_at(&self) -> String {
        self.0.created_at.to_rfc3339()
    }

    async fn comments(&self) -> Vec<CommentObject> {
        self.0.comments.iter().cloned().map(CommentObject).collect()
    }

    async fn comment_count(&self) -> i32 {
        count(self.0.comments.len())
    }
}

pub struct CommentObject(pub Comment);

#[Object(name = "Comment")]
impl CommentObject {
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn comment_text(&self) -> &str {
        &self.0.text
    }

    async fn username(&self) -> &str {
        self.0.username.as_ref()
    }

    async fn created_at(&self) -> String {
        self.0.created_at.to_rfc3339()
    }
}

/// Result of `addUser` and `login`.
#[derive(SimpleObject)]
#[graphql(name = "Auth")]
pub struct AuthObject {
    pub token: ID,
    pub user: UserObject,
}

impl From<AuthPayload> for AuthObject {
    fn from(payload: AuthPayload) -> Self {
        Self {
            token: ID(payload.token),
            user: UserObject::new(payload.user),
        }
    }
}
