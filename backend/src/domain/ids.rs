//! UUID-backed document identifiers.
//!
//! Users, pets, statuses, and comments are independently addressable
//! documents. Each gets its own identifier newtype so a pet id can never be
//! passed where a status id is expected.

use std::fmt;

/// Validation errors raised while parsing document identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdValidationError {
    /// The identifier was empty.
    Empty { kind: &'static str },
    /// The identifier was not a canonical UUID string.
    Invalid { kind: &'static str },
}

impl IdValidationError {
    /// Document kind the identifier was meant for (e.g. `"pet"`).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty { kind } | Self::Invalid { kind } => kind,
        }
    }
}

impl fmt::Display for IdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { kind } => write!(f, "{kind} id must not be empty"),
            Self::Invalid { kind } => write!(f, "{kind} id must be a valid UUID"),
        }
    }
}

impl std::error::Error for IdValidationError {}

macro_rules! define_document_id {
    (
        $(#[$outer:meta])*
        $name:ident => $kind:literal
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[derive(::serde::Serialize, ::serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Parse an identifier from its canonical string form.
            pub fn new(id: impl AsRef<str>) -> Result<Self, IdValidationError> {
                let raw = id.as_ref();
                if raw.is_empty() {
                    return Err(IdValidationError::Empty { kind: $kind });
                }
                if raw.trim() != raw {
                    return Err(IdValidationError::Invalid { kind: $kind });
                }
                ::uuid::Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| IdValidationError::Invalid { kind: $kind })
            }

            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID, e.g. one read back from storage.
            pub fn from_uuid(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

define_document_id! {
    /// Stable identifier of a user account.
    UserId => "user"
}

define_document_id! {
    /// Stable identifier of a pet document.
    PetId => "pet"
}

define_document_id! {
    /// Stable identifier of a status document.
    StatusId => "status"
}

define_document_id! {
    /// Identifier of a comment embedded in a status.
    CommentId => "comment"
}
