//! Driving port for account mutations: registration, login and profile
//! updates.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::{AuthPayload, Error, SessionUser, User};

/// `addUser` input as received from the client.
#[derive(Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: Zeroizing<String>,
}

/// `login` input as received from the client.
#[derive(Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: Zeroizing<String>,
}

/// `updateUser` input; absent fields keep their stored values.
#[derive(Clone, Default)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<Zeroizing<String>>,
}

/// Domain use-case port for account mutations.
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create a user and sign a token for it.
    async fn register(&self, request: RegisterRequest) -> Result<AuthPayload, Error>;

    /// Verify credentials and sign a token. Every failure reports
    /// "Incorrect credentials".
    async fn login(&self, request: LoginRequest) -> Result<AuthPayload, Error>;

    /// Patch the session user's profile.
    async fn update_profile(
        &self,
        session: Option<&SessionUser>,
        request: UpdateProfileRequest,
    ) -> Result<User, Error>;
}
