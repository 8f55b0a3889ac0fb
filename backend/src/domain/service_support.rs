//! Shared helpers for the domain services: id parsing, owner filters and
//! persistence error mapping.

use std::str::FromStr;

use serde_json::json;

use super::ports::{PetPersistenceError, StatusPersistenceError, UserPersistenceError};
use super::{Error, IdValidationError, Username};

/// Parse a client-supplied document id, naming `field` on failure.
pub(super) fn parse_id<T>(raw: &str, field: &str) -> Result<T, Error>
where
    T: FromStr<Err = IdValidationError>,
{
    raw.parse::<T>()
        .map_err(|err| Error::invalid_field(field, err))
}

/// Outcome of interpreting an optional `username` list filter.
pub(super) enum OwnerFilter {
    All,
    Only(Username),
    /// The filter cannot match any stored username.
    Nothing,
}

impl OwnerFilter {
    /// A missing or empty filter lists everything. Any other value is
    /// matched exactly, so padding or an invalid username matches nothing.
    pub(super) fn parse(username: Option<&str>) -> Self {
        match username {
            None | Some("") => Self::All,
            Some(raw) => match Username::new(raw) {
                Ok(owner) if owner.as_ref() == raw => Self::Only(owner),
                _ => Self::Nothing,
            },
        }
    }
}

fn duplicate(field: String) -> Error {
    Error::conflict(format!("{field} is already taken")).with_details(json!({ "field": field }))
}

pub(super) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { field } => duplicate(field),
    }
}

pub(super) fn map_pet_error(error: PetPersistenceError) -> Error {
    match error {
        PetPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("pet repository unavailable: {message}"))
        }
        PetPersistenceError::Query { message } => {
            Error::internal(format!("pet repository error: {message}"))
        }
        PetPersistenceError::Duplicate { field } => duplicate(field),
    }
}

pub(super) fn map_status_error(error: StatusPersistenceError) -> Error {
    match error {
        StatusPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("status repository unavailable: {message}"))
        }
        StatusPersistenceError::Query { message } => {
            Error::internal(format!("status repository error: {message}"))
        }
        StatusPersistenceError::Duplicate { field } => duplicate(field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, PetId};
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    fn absent_filters_list_everything(#[case] raw: Option<&str>) {
        assert!(matches!(OwnerFilter::parse(raw), OwnerFilter::All));
    }

    #[rstest]
    #[case::whitespace_only("   ")]
    #[case::padded(" alice ")]
    #[case::trailing_space("alice ")]
    fn untrimmed_filters_match_nothing(#[case] raw: &str) {
        assert!(matches!(OwnerFilter::parse(Some(raw)), OwnerFilter::Nothing));
    }

    #[rstest]
    fn exact_filter_keeps_the_name() {
        let OwnerFilter::Only(owner) = OwnerFilter::parse(Some("alice")) else {
            panic!("expected an owner filter");
        };
        assert_eq!(owner.as_ref(), "alice");
    }

    #[rstest]
    fn overlong_filter_matches_nothing() {
        let raw = "x".repeat(crate::domain::USERNAME_MAX + 1);
        assert!(matches!(OwnerFilter::parse(Some(&raw)), OwnerFilter::Nothing));
    }

    #[rstest]
    fn malformed_ids_name_the_field() {
        let err = parse_id::<PetId>("not-a-uuid", "petId").expect_err("malformed");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details(), Some(&json!({ "field": "petId" })));
    }

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
    #[case(UserPersistenceError::duplicate("email"), ErrorCode::Conflict)]
    fn user_errors_map_to_codes(#[case] error: UserPersistenceError, #[case] code: ErrorCode) {
        assert_eq!(map_user_error(error).code(), code);
    }
}
