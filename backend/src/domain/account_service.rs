//! Account domain service: registration, login, profile updates and the
//! `me` lookup.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::ports::{
    AccountCommand, AccountQuery, LoginRequest, PasswordHasher, PetRepository, Profile,
    RegisterRequest, StatusRepository, TokenIssuer, UpdateProfileRequest, UserRepository,
};
use super::service_support::{map_pet_error, map_status_error, map_user_error};
use super::{
    AuthPayload, Error, INCORRECT_CREDENTIALS, LoginCredentials, PasswordHash, ProfileUpdate,
    Registration, SessionUser, User, UserId, UserPatch, require_session,
};

/// Well-formed Argon2id hash that no password verifies against. Unknown
/// emails are checked against it so both login failures cost one
/// verification.
const DUMMY_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Account service implementing [`AccountCommand`] and [`AccountQuery`].
#[derive(Clone)]
pub struct AccountService<U, P, S> {
    users: Arc<U>,
    pets: Arc<P>,
    statuses: Arc<S>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl<U, P, S> AccountService<U, P, S> {
    pub fn new(
        users: Arc<U>,
        pets: Arc<P>,
        statuses: Arc<S>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            pets,
            statuses,
            hasher,
            tokens,
        }
    }
}

impl<U, P, S> AccountService<U, P, S>
where
    U: UserRepository,
    P: PetRepository,
    S: StatusRepository,
{
    fn incorrect_credentials() -> Error {
        Error::unauthenticated(INCORRECT_CREDENTIALS)
    }

    fn issue(&self, user: User) -> Result<AuthPayload, Error> {
        let token = self.tokens.issue(&user)?;
        Ok(AuthPayload { token, user })
    }

    async fn find_existing(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("User not found"))
    }
}

#[async_trait]
impl<U, P, S> AccountCommand for AccountService<U, P, S>
where
    U: UserRepository,
    P: PetRepository,
    S: StatusRepository,
{
    async fn register(&self, request: RegisterRequest) -> Result<AuthPayload, Error> {
        let registration =
            Registration::try_from_parts(&request.username, &request.email, &request.password)
                .map_err(|err| Error::invalid_field(err.field(), err))?;
        let hash = self.hasher.hash(registration.password.expose())?;
        let user = User::new(
            UserId::random(),
            registration.username,
            registration.email,
            hash,
        );
        self.users.create(&user).await.map_err(map_user_error)?;
        info!(user_id = %user.id(), username = %user.username(), "registered user");
        self.issue(user)
    }

    async fn login(&self, request: LoginRequest) -> Result<AuthPayload, Error> {
        let credentials = LoginCredentials::try_from_parts(&request.email, &request.password)
            .map_err(|err| {
                debug!(field = err.field(), "login rejected: blank credentials");
                Self::incorrect_credentials()
            })?;
        let found = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?;

        let Some(user) = found else {
            let dummy = PasswordHash::from_encoded(DUMMY_PASSWORD_HASH);
            if let Err(err) = self.hasher.verify(credentials.password(), &dummy) {
                warn!(error = %err, "dummy password hash unusable");
            }
            debug!("login rejected: unknown email");
            return Err(Self::incorrect_credentials());
        };

        let verified = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .map_err(|err| {
                warn!(user_id = %user.id(), error = %err, "stored password hash unusable");
                err
            })?;
        if !verified {
            debug!(user_id = %user.id(), "login rejected: wrong password");
            return Err(Self::incorrect_credentials());
        }
        self.issue(user)
    }

    async fn update_profile(
        &self,
        session: Option<&SessionUser>,
        request: UpdateProfileRequest,
    ) -> Result<User, Error> {
        let session = require_session(session)?;
        let update = ProfileUpdate::try_from_parts(
            request.username.as_deref(),
            request.email.as_deref(),
            request.password.as_deref().map(String::as_str),
        )
        .map_err(|err| Error::invalid_field(err.field(), err))?;

        let password_hash = update
            .password
            .as_ref()
            .map(|password| self.hasher.hash(password.expose()))
            .transpose()?;
        let patch = UserPatch {
            username: update.username,
            email: update.email,
            password_hash,
        };
        if patch.is_empty() {
            return self.find_existing(session.id()).await;
        }

        self.users
            .update(session.id(), &patch)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("User not found"))
    }
}

#[async_trait]
impl<U, P, S> AccountQuery for AccountService<U, P, S>
where
    U: UserRepository,
    P: PetRepository,
    S: StatusRepository,
{
    async fn me(&self, session: Option<&SessionUser>) -> Result<Profile, Error> {
        let session = require_session(session)?;
        let user = self.find_existing(session.id()).await?;
        self.populate(user).await
    }

    async fn populate(&self, user: User) -> Result<Profile, Error> {
        let pets = self
            .pets
            .find_by_ids(user.pet_ids())
            .await
            .map_err(map_pet_error)?;
        let status = match user.status_id() {
            Some(id) => self
                .statuses
                .find_by_id(id)
                .await
                .map_err(map_status_error)?,
            None => None,
        };
        Ok(Profile { user, pets, status })
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
