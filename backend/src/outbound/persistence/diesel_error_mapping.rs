//! Shared Diesel error mapping for the document repositories.
//!
//! Each repository passes its port error constructors; this module decides
//! which one applies.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Constructors for one port's error enum.
pub(super) struct ErrorCtors<E> {
    pub connection: fn(String) -> E,
    pub query: fn(String) -> E,
    pub duplicate: fn(String) -> E,
}

impl<E> ErrorCtors<E> {
    pub(super) fn pool(&self, error: PoolError) -> E {
        (self.connection)(error.message().to_owned())
    }

    pub(super) fn diesel(&self, error: DieselError) -> E {
        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, message = info.message(), "diesel operation failed");
            }
            _ => debug!(
                error_type = %std::any::type_name_of_val(&error),
                "diesel operation failed"
            ),
        }

        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                (self.duplicate)(unique_field(info.constraint_name()))
            }
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                (self.connection)("database connection error".to_owned())
            }
            DieselError::NotFound => (self.query)("record not found".to_owned()),
            DieselError::QueryBuilderError(_) => (self.query)("database query error".to_owned()),
            _ => (self.query)("database error".to_owned()),
        }
    }

    /// Stored data that no longer passes domain validation.
    pub(super) fn corrupt(&self, message: String) -> E {
        (self.query)(message)
    }
}

/// Column named by a `<table>_<column>_key` unique constraint.
fn unique_field(constraint: Option<&str>) -> String {
    constraint
        .and_then(|name| name.strip_suffix("_key"))
        .and_then(|name| name.split_once('_'))
        .map_or_else(|| "value".to_owned(), |(_, column)| column.to_owned())
}
