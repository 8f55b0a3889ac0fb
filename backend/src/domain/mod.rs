//! Domain primitives, ports and services.
//!
//! Purpose: define the documents of the pet social network (users, pets,
//! statuses with embedded comments), validate client input before it
//! reaches a store, and implement the GraphQL use-cases as services over
//! the driven ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Pet, Status, Comment: stored documents.
//! - SessionUser: per-request caller identity, passed explicitly.
//! - AccountService, PetService, StatusService: driving port
//!   implementations.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod ids;
pub mod ownership;
pub mod pet;
pub mod pet_service;
pub mod ports;
mod service_support;
pub mod status;
pub mod status_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    AuthPayload, AuthValidationError, INCORRECT_CREDENTIALS, LOGIN_REQUIRED, LoginCredentials,
    NewPassword, PASSWORD_MIN, ProfileUpdate, Registration, SessionUser, require_session,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{CommentId, IdValidationError, PetId, StatusId, UserId};
pub use self::ownership::OwnershipPolicy;
pub use self::pet::{
    PET_BREED_MAX, PET_GENDER_MAX, PET_NAME_MAX, Pet, PetChanges, PetDraft, PetValidationError,
};
pub use self::pet_service::PetService;
pub use self::status::{
    Comment, CommentText, Status, StatusText, TEXT_MAX, TextValidationError,
};
pub use self::status_service::StatusService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EMAIL_MAX, Email, PasswordHash, USERNAME_MAX, User, UserPatch, UserValidationError, Username,
};

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use petsocial::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<()> {
///     Err(Error::not_found("gone"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
