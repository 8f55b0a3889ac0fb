//! User account model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{PetId, StatusId, UserId};

/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 32;

/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 320;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooLong { max: usize },
    EmptyEmail,
    EmailTooLong { max: usize },
    InvalidEmail,
}

impl UserValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::UsernameTooLong { .. } => "username",
            Self::EmptyEmail | Self::EmailTooLong { .. } | Self::InvalidEmail => "email",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Public handle of a user; also the owner tag on pets, statuses, and
/// comments.
///
/// ## Invariants
/// - trimmed, non-empty, at most [`USERNAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Login email address, stored trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    ///
    /// # Examples
    /// ```
    /// use petsocial::domain::Email;
    ///
    /// let email = Email::new("  Rex@Example.COM ").unwrap();
    /// assert_eq!(email.as_ref(), "rex@example.com");
    /// assert!(Email::new("not-an-address").is_err());
    /// ```
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = Self::normalise(email.as_ref());
        if normalised.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if normalised.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        let valid = normalised.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        });
        if !valid {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }

    /// Canonical lookup form of an address without validating it.
    pub fn normalise(raw: &str) -> String {
        raw.trim().to_lowercase()
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Encoded password hash (PHC string). Never leaves the service.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a credential hasher.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded PHC string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Application user.
///
/// ## Invariants
/// - `pet_ids` preserves the order pets were added in.
/// - at most one status is linked via `status_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    email: Email,
    password_hash: PasswordHash,
    pet_ids: Vec<PetId>,
    status_id: Option<StatusId>,
}

impl User {
    /// Build a freshly registered user with no pets or status.
    pub fn new(id: UserId, username: Username, email: Email, password_hash: PasswordHash) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            pet_ids: Vec::new(),
            status_id: None,
        }
    }

    /// Attach stored pet references.
    #[must_use]
    pub fn with_pet_ids(mut self, pet_ids: Vec<PetId>) -> Self {
        self.pet_ids = pet_ids;
        self
    }

    /// Attach a stored status reference.
    #[must_use]
    pub fn with_status_id(mut self, status_id: Option<StatusId>) -> Self {
        self.status_id = status_id;
        self
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn pet_ids(&self) -> &[PetId] {
        &self.pet_ids
    }

    pub fn status_id(&self) -> Option<&StatusId> {
        self.status_id.as_ref()
    }

    /// Apply a profile patch in place.
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(username) = &patch.username {
            self.username = username.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(hash) = &patch.password_hash {
            self.password_hash = hash.clone();
        }
    }
}

/// Partial profile update applied by `updateUser`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: Option<Username>,
    pub email: Option<Email>,
    pub password_hash: Option<PasswordHash>,
}

impl UserPatch {
    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}
