//! Shared helpers and macros for Diesel repository implementations.
//!
//! This module provides:
//! - Error mapping from pool and Diesel failures to [`RepositoryError`]
//! - Checked casts between PostgreSQL integers and domain counters
//! - Declarative macros for the common "one row" and "many rows" queries

use std::str::FromStr;

use tracing::debug;

use crate::domain::UnknownLabel;
use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Map pool errors to connection failures.
pub fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message }
        | PoolError::Build { message }
        | PoolError::Migration { message } => RepositoryError::connection(message),
    }
}

/// Map Diesel errors to repository errors.
///
/// Unique violations become [`RepositoryError::Duplicate`] carrying the
/// constraint name so services can translate them into conflicts.
pub fn map_diesel_error(error: diesel::result::Error) -> RepositoryError {
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
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            RepositoryError::duplicate(info.constraint_name().unwrap_or("unique constraint"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => RepositoryError::query("database error"),
        _ => RepositoryError::query("database error"),
    }
}

/// Read a non-negative `INTEGER` column into a domain counter.
pub fn u32_from_db(value: i32, column: &'static str) -> Result<u32, RepositoryError> {
    u32::try_from(value).map_err(|_| RepositoryError::query(format!("{column} is negative")))
}

/// Store a domain counter in an `INTEGER` column, saturating at `i32::MAX`.
pub fn u32_to_db(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Read a non-negative `BIGINT` column.
pub fn u64_from_db(value: i64, column: &'static str) -> Result<u64, RepositoryError> {
    u64::try_from(value).map_err(|_| RepositoryError::query(format!("{column} is negative")))
}

/// Store an amount in a `BIGINT` column, saturating at `i64::MAX`.
pub fn u64_to_db(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Parse a stored label into its domain vocabulary.
pub fn label_from_db<T>(value: &str) -> Result<T, RepositoryError>
where
    T: FromStr<Err = UnknownLabel>,
{
    value
        .parse::<T>()
        .map_err(|error| RepositoryError::query(error.to_string()))
}

/// Macro for query methods that return `Option<T>`.
///
/// Acquires a connection, loads at most one row, and converts it with a
/// fallible converter.
#[macro_export]
macro_rules! query_optional {
    (
        $self:ident,
        $table:expr,
        $filter:expr,
        $row_type:ty,
        $converter:expr
    ) => {{
        use diesel::prelude::*;
        use diesel_async::RunQueryDsl;
        use $crate::outbound::persistence::diesel_helpers::map_diesel_error;
        use $crate::outbound::persistence::diesel_helpers::map_pool_error;

        let mut conn = $self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<$row_type> = $table
            .filter($filter)
            .select(<$row_type>::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        result.map($converter).transpose()
    }};
}

/// Macro for query methods that return `Vec<T>`.
///
/// Acquires a connection, loads every matching row in the given order, and
/// converts each one.
#[macro_export]
macro_rules! query_vec {
    (
        $self:ident,
        $table:expr,
        $filter:expr,
        $order_by:expr,
        $row_type:ty,
        $converter:expr
    ) => {{
        use diesel::prelude::*;
        use diesel_async::RunQueryDsl;
        use $crate::outbound::persistence::diesel_helpers::map_diesel_error;
        use $crate::outbound::persistence::diesel_helpers::map_pool_error;

        let mut conn = $self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<$row_type> = $table
            .filter($filter)
            .select(<$row_type>::as_select())
            .order_by($order_by)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map($converter).collect()
    }};
}

/// Macro for soft deletes.
///
/// Stamps `deleted_at` on a live row and reports whether one matched.
#[macro_export]
macro_rules! soft_delete {
    ($self:ident, $table:ident, $id:expr, $deleted_at:expr) => {{
        use diesel::prelude::*;
        use diesel_async::RunQueryDsl;
        use $crate::outbound::persistence::diesel_helpers::map_diesel_error;
        use $crate::outbound::persistence::diesel_helpers::map_pool_error;

        let mut conn = $self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update($table::table)
            .filter($table::id.eq($id))
            .filter($table::deleted_at.is_null())
            .set($table::deleted_at.eq(Some($deleted_at)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MemberRole;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_are_connection_failures() {
        let error = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(error, RepositoryError::connection("timed out"));
    }

    #[rstest]
    fn not_found_is_a_query_failure() {
        let error = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(error, RepositoryError::Query { .. }));
    }

    #[rstest]
    #[case(-1, None)]
    #[case(0, Some(0))]
    #[case(42, Some(42))]
    fn counters_must_be_non_negative(#[case] raw: i32, #[case] expected: Option<u32>) {
        assert_eq!(u32_from_db(raw, "position").ok(), expected);
    }

    #[rstest]
    fn large_counters_saturate() {
        assert_eq!(u32_to_db(u32::MAX), i32::MAX);
        assert_eq!(u64_to_db(u64::MAX), i64::MAX);
    }

    #[rstest]
    fn unknown_labels_are_query_failures() {
        let error = label_from_db::<MemberRole>("overlord").expect_err("unknown");
        assert!(error.to_string().contains("overlord"));
        assert_eq!(label_from_db::<MemberRole>("owner"), Ok(MemberRole::Owner));
    }
}
