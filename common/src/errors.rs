// Error handling framework

use thiserror::Error;

/// A partial update was requested with no fields to change
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No data supplied for update")]
pub struct EmptyUpdateError;

/// Authentication and authorization errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Payload validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Schema validation failed: {}", .0.join("; "))]
    SchemaViolations(Vec<String>),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
}

impl ValidationError {
    /// Human-readable violations, one per entry
    pub fn violations(&self) -> Vec<String> {
        match self {
            ValidationError::SchemaViolations(violations) => violations.clone(),
            ValidationError::InvalidJson(reason) => vec![reason.clone()],
        }
    }
}

/// Database-specific errors
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Database health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Duplicate key violation: {0}")]
    DuplicateKey(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error(transparent)]
    EmptyUpdate(#[from] EmptyUpdateError),
}

impl DatabaseError {
    /// Whether the failure was caused by the caller's input rather than the database
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::DuplicateKey(_)
                | DatabaseError::ForeignKeyViolation(_)
                | DatabaseError::CheckViolation(_)
                | DatabaseError::EmptyUpdate(_)
        )
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("Record not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // Map PostgreSQL SQLSTATE codes
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => DatabaseError::DuplicateKey(db_err.message().to_string()),
                        "23503" => DatabaseError::ForeignKeyViolation(db_err.message().to_string()),
                        "23514" => DatabaseError::CheckViolation(db_err.message().to_string()),
                        _ => DatabaseError::QueryFailed(db_err.message().to_string()),
                    }
                } else {
                    DatabaseError::QueryFailed(db_err.message().to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DatabaseError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DatabaseError::MigrationFailed(err.to_string())
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        ValidationError::InvalidJson(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update_display() {
        assert_eq!(EmptyUpdateError.to_string(), "No data supplied for update");
    }

    #[test]
    fn test_empty_update_propagates_unchanged() {
        let err: DatabaseError = EmptyUpdateError.into();
        assert!(matches!(err, DatabaseError::EmptyUpdate(EmptyUpdateError)));
        assert_eq!(err.to_string(), "No data supplied for update");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_not_found_is_not_client_error() {
        let err = DatabaseError::NotFound("No job: 7".to_string());
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: DatabaseError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DatabaseError::NotFound(_)));
    }

    #[test]
    fn test_schema_violations_display() {
        let err = ValidationError::SchemaViolations(vec![
            "instance.salary must be an integer".to_string(),
            "instance requires property \"title\"".to_string(),
        ]);
        assert!(err.to_string().contains("instance.salary must be an integer"));
        assert_eq!(err.violations().len(), 2);
    }
}
