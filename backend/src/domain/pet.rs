//! Pet documents.

use std::fmt;

use super::{PetId, Username};

/// Longest accepted pet name, in characters.
pub const PET_NAME_MAX: usize = 255;
/// Longest accepted gender label, in characters.
pub const PET_GENDER_MAX: usize = 64;
/// Longest accepted breed, in characters.
pub const PET_BREED_MAX: usize = 255;

/// Validation errors for pet input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetValidationError {
    EmptyName,
    NegativeAge { age: i32 },
    TooLong { field: &'static str, max: usize },
}

impl PetValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::NegativeAge { .. } => "age",
            Self::TooLong { field, .. } => field,
        }
    }
}

impl fmt::Display for PetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "pet name must not be empty"),
            Self::NegativeAge { age } => write!(f, "pet age must not be negative, got {age}"),
            Self::TooLong { field, max } => {
                write!(f, "pet {field} must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for PetValidationError {}

fn validate_name(name: &str) -> Result<String, PetValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PetValidationError::EmptyName);
    }
    validate_len("name", trimmed, PET_NAME_MAX)
}

fn validate_len(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, PetValidationError> {
    if value.chars().count() > max {
        return Err(PetValidationError::TooLong { field, max });
    }
    Ok(value.to_owned())
}

fn validate_gender(gender: &str) -> Result<String, PetValidationError> {
    validate_len("gender", gender, PET_GENDER_MAX)
}

fn validate_breed(breed: &str) -> Result<String, PetValidationError> {
    validate_len("breed", breed, PET_BREED_MAX)
}

fn validate_age(age: Option<i32>) -> Result<Option<i32>, PetValidationError> {
    match age {
        Some(age) if age < 0 => Err(PetValidationError::NegativeAge { age }),
        other => Ok(other),
    }
}

/// Pet record owned by a user.
///
/// `username` is the owner tag written at creation time and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub breed: Option<String>,
    pub username: Username,
}

impl Pet {
    /// Materialise a draft for `owner` under a fresh identifier.
    pub fn from_draft(id: PetId, draft: PetDraft, owner: Username) -> Self {
        Self {
            id,
            name: draft.name,
            age: draft.age,
            gender: draft.gender,
            breed: draft.breed,
            username: owner,
        }
    }

    /// Overwrite the fields present in `changes`.
    pub fn apply(&mut self, changes: &PetChanges) {
        if let Some(name) = &changes.name {
            self.name.clone_from(name);
        }
        if let Some(age) = changes.age {
            self.age = Some(age);
        }
        if let Some(gender) = &changes.gender {
            self.gender = Some(gender.clone());
        }
        if let Some(breed) = &changes.breed {
            self.breed = Some(breed.clone());
        }
    }
}

/// Validated `addPet` input.
///
/// # Examples
/// ```
/// use petsocial::domain::PetDraft;
///
/// let draft = PetDraft::try_from_parts(" Rex ", Some(3), None, Some("Collie")).unwrap();
/// assert_eq!(draft.name, "Rex");
/// assert!(PetDraft::try_from_parts("", None, None, None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetDraft {
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub breed: Option<String>,
}

impl PetDraft {
    pub fn try_from_parts(
        name: &str,
        age: Option<i32>,
        gender: Option<&str>,
        breed: Option<&str>,
    ) -> Result<Self, PetValidationError> {
        Ok(Self {
            name: validate_name(name)?,
            age: validate_age(age)?,
            gender: gender.map(validate_gender).transpose()?,
            breed: breed.map(validate_breed).transpose()?,
        })
    }
}

/// Validated `updatePet` input; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetChanges {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub breed: Option<String>,
}

impl PetChanges {
    pub fn try_from_parts(
        name: Option<&str>,
        age: Option<i32>,
        gender: Option<&str>,
        breed: Option<&str>,
    ) -> Result<Self, PetValidationError> {
        Ok(Self {
            name: name.map(validate_name).transpose()?,
            age: validate_age(age)?,
            gender: gender.map(validate_gender).transpose()?,
            breed: breed.map(validate_breed).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.gender.is_none() && self.breed.is_none()
    }
}
