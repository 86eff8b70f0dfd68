use async_graphql::{Error as GraphQlError, ErrorExtensions};
use thiserror::Error;

/// Application-level error type.
/// Resolvers convert it with `ErrorExtensions::extend`, which attaches a stable
/// `extensions.code` for clients to branch on.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Unique constraint violation, e.g. a duplicate company name.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Foreign key violation or a delete blocked by dependent rows.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Constraint(_) => "CONSTRAINT_VIOLATION",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn not_found(entity: &str, id: &str) -> Self {
        AppError::NotFound(format!("{entity} {id} not found"))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(db.message().to_string())
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::Constraint(db.message().to_string())
            }
            _ => AppError::Database(err),
        }
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> GraphQlError {
        let message = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                "A database error occurred".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
            other => other.to_string(),
        };
        let code = self.code();
        GraphQlError::new(message).extend_with(|_, ext| ext.set("code", code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_code_is_attached() {
        let err = AppError::not_found("Company", "abc").extend();
        assert_eq!(err.message, "Not found: Company abc not found");
        let ext = err.extensions.expect("extensions");
        assert_eq!(
            ext.get("code"),
            Some(&async_graphql::Value::from("NOT_FOUND"))
        );
    }

    #[test]
    fn test_database_details_are_hidden() {
        let err = AppError::Database(sqlx::Error::PoolTimedOut).extend();
        assert_eq!(err.message, "A database error occurred");
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(matches!(
            AppError::from(sqlx::Error::RowNotFound),
            AppError::NotFound(_)
        ));
    }
}
