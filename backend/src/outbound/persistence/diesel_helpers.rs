//! Shared error mapping for the Diesel place repository.

use tracing::debug;

use super::pool::PoolError;
use crate::domain::ports::PlaceRepositoryError;

/// Map pool errors to store connection errors.
pub fn map_pool_error(error: PoolError) -> PlaceRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PlaceRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to place store errors, emitting debug context.
pub fn map_diesel_error(error: diesel::result::Error) -> PlaceRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

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
        DieselError::NotFound => PlaceRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => PlaceRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            PlaceRepositoryError::conflict(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PlaceRepositoryError::connection("database connection error")
        }
        _ => PlaceRepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    //! Error classification for store failures.

    use super::*;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    struct Info(&'static str);

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("places")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info("duplicate key value")))
    }

    #[rstest]
    #[case::unique(database_error(DatabaseErrorKind::UniqueViolation), "conflict")]
    #[case::closed(database_error(DatabaseErrorKind::ClosedConnection), "connection")]
    #[case::check(database_error(DatabaseErrorKind::CheckViolation), "query")]
    #[case::not_found(DieselError::NotFound, "query")]
    fn classifies_diesel_errors(#[case] error: DieselError, #[case] expected: &str) {
        let mapped = map_diesel_error(error);
        let actual = match mapped {
            PlaceRepositoryError::Conflict { .. } => "conflict",
            PlaceRepositoryError::Connection { .. } => "connection",
            PlaceRepositoryError::Query { .. } => "query",
        };
        assert_eq!(actual, expected);
    }

    #[test]
    fn pool_errors_are_connection_failures() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, PlaceRepositoryError::connection("timed out"));
    }
}
