//! Authentication primitives: session identity, credentials and
//! registration input.
//!
//! Inbound adapters build these from raw strings before a service is called,
//! so the services never see unvalidated passwords or addresses.

use std::fmt;

use zeroize::Zeroizing;

use super::{Email, Error, User, UserId, UserValidationError, Username};

/// Message returned by every operation that needs a logged-in caller.
pub const LOGIN_REQUIRED: &str = "You need to be logged in!";

/// Message returned for any failed login, whatever the cause.
pub const INCORRECT_CREDENTIALS: &str = "Incorrect credentials";

/// Minimum number of characters in a new password.
pub const PASSWORD_MIN: usize = 5;

/// Identity of the caller, decoded from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    id: UserId,
    username: Username,
}

impl SessionUser {
    pub fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self::new(*user.id(), user.username().clone())
    }
}

/// Return the session user or the unified "not logged in" error.
///
/// # Examples
/// ```
/// use petsocial::domain::{require_session, ErrorCode};
///
/// let err = require_session(None).unwrap_err();
/// assert_eq!(err.code(), ErrorCode::Unauthenticated);
/// assert_eq!(err.message(), "You need to be logged in!");
/// ```
pub fn require_session(session: Option<&SessionUser>) -> Result<&SessionUser, Error> {
    session.ok_or_else(|| Error::unauthenticated(LOGIN_REQUIRED))
}

/// Validation errors for credential and registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// Username or email failed validation.
    User(UserValidationError),
    /// Password was blank.
    EmptyPassword,
    /// Password was shorter than [`PASSWORD_MIN`].
    PasswordTooShort { min: usize },
}

impl AuthValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::User(err) => err.field(),
            Self::EmptyPassword | Self::PasswordTooShort { .. } => "password",
        }
    }
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(err) => err.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for AuthValidationError {}

impl From<UserValidationError> for AuthValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::User(value)
    }
}

/// New plaintext password, zeroed on drop.
///
/// Whitespace is kept as given so the stored hash matches what the user
/// typed.
#[derive(Clone, PartialEq, Eq)]
pub struct NewPassword(Zeroizing<String>);

impl NewPassword {
    pub fn new(password: &str) -> Result<Self, AuthValidationError> {
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        if password.chars().count() < PASSWORD_MIN {
            return Err(AuthValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self(Zeroizing::new(password.to_owned())))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NewPassword(<redacted>)")
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is in canonical lookup form (trimmed, lower-cased).
/// - `password` is non-empty; its length is not checked so that a short
///   guess fails the same way as any other wrong password.
///
/// # Examples
/// ```
/// use petsocial::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Rex@Example.com", "woof!").unwrap();
/// assert_eq!(creds.email(), "rex@example.com");
/// assert_eq!(creds.password(), "woof!");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let email = Email::normalise(email);
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail.into());
        }
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for user lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated `addUser` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: Username,
    pub email: Email,
    pub password: NewPassword,
}

impl Registration {
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, AuthValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            email: Email::new(email)?,
            password: NewPassword::new(password)?,
        })
    }
}

/// Validated `updateUser` input; absent fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub username: Option<Username>,
    pub email: Option<Email>,
    pub password: Option<NewPassword>,
}

impl ProfileUpdate {
    pub fn try_from_parts(
        username: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, AuthValidationError> {
        Ok(Self {
            username: username.map(Username::new).transpose()?,
            email: email.map(Email::new).transpose()?,
            password: password.map(NewPassword::new).transpose()?,
        })
    }
}

/// Result of `addUser` and `login`: a signed token plus the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}
