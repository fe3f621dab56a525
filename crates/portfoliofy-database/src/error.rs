//! Mapping from sqlx errors to [`AppError`].

use portfoliofy_core::error::{AppError, ErrorKind};

/// Convert a sqlx error into an [`AppError`].
///
/// Unique violations become `Conflict`, a missing row becomes `NotFound`,
/// anything else is a `Database` error.
pub fn db_error(context: &str, err: sqlx::Error) -> AppError {
    let unique = matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation());
    if unique {
        return AppError::with_source(
            ErrorKind::Conflict,
            format!("{context}: a conflicting record already exists"),
            err,
        );
    }
    if matches!(err, sqlx::Error::RowNotFound) {
        return AppError::with_source(ErrorKind::NotFound, context.to_string(), err);
    }
    AppError::with_source(ErrorKind::Database, format!("{context}: {err}"), err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = db_error("Failed to find portfolio", sqlx::Error::RowNotFound);
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_pool_errors_map_to_database() {
        let err = db_error("Failed to list users", sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind, ErrorKind::Database);
        assert!(err.message.starts_with("Failed to list users"));
    }
}
