//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hasher, token issuer) are implemented by
//! `outbound` adapters. Driving ports (`*Command`, `*Query`) are implemented
//! by the domain services and called by the GraphQL resolvers.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod account_query;
mod password_hasher;
mod pet_command;
mod pet_query;
mod pet_repository;
mod status_command;
mod status_query;
mod status_repository;
mod token_issuer;
mod user_repository;

pub use account_command::{AccountCommand, LoginRequest, RegisterRequest, UpdateProfileRequest};
pub use account_query::{AccountQuery, Profile};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::PasswordHasher;
pub use pet_command::{AddPetRequest, PetCommand, UpdatePetRequest};
pub use pet_query::PetQuery;
#[cfg(test)]
pub use pet_repository::MockPetRepository;
pub use pet_repository::{PetPersistenceError, PetRepository};
pub use status_command::{
    AddCommentRequest, DeleteCommentRequest, StatusCommand, UpdateStatusRequest,
};
pub use status_query::StatusQuery;
#[cfg(test)]
pub use status_repository::MockStatusRepository;
pub use status_repository::{StatusPersistenceError, StatusRepository};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::TokenIssuer;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
