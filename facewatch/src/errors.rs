use crate::db::errors::DbError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Authentication required but not provided, or credentials invalid
    #[error("Not authenticated")]
    Unauthenticated { message: Option<String> },

    /// Malformed input on a specific field
    #[error("Invalid value for {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// A package quota would be exceeded by the requested creation
    #[error("{resource} limit reached ({limit})")]
    QuotaExceeded { resource: &'static str, limit: i32 },

    /// Invalid request data or business rule violation
    #[error("{message}")]
    BadRequest { message: String },

    /// Requested resource not found (also covers resources owned by another user)
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: &'static str, id: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::QuotaExceeded { .. } => StatusCode::BAD_REQUEST,
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::UniqueViolation { .. } => StatusCode::CONFLICT,
                DbError::ForeignKeyViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::CheckViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::Unauthenticated { message } => message.clone().unwrap_or_else(|| "Authentication required".to_string()),
            Error::Validation { field, message } => format!("{field}: {message}"),
            Error::QuotaExceeded { resource, limit } => {
                format!("{resource} limit reached. Your package allows {limit} {resource}.")
            }
            Error::BadRequest { message } => message.clone(),
            Error::NotFound { resource, id } => format!("{resource} with ID {id} not found"),
            Error::Internal { .. } => "Internal server error".to_string(),
            Error::Database(db_err) => match db_err {
                DbError::NotFound => "Resource not found".to_string(),
                DbError::UniqueViolation { constraint, table, .. } => match (table.as_deref(), constraint.as_deref()) {
                    (Some("users"), Some(c)) if c.contains("email") => "An account with this email address already exists".to_string(),
                    (Some("packages"), Some(c)) if c.contains("name") => "A package with this name already exists".to_string(),
                    _ => "Resource already exists".to_string(),
                },
                DbError::ForeignKeyViolation { .. } => "Invalid reference to related resource".to_string(),
                DbError::CheckViolation { .. } => "Invalid data provided".to_string(),
                DbError::Other(_) => "Database error occurred".to_string(),
            },
            Error::Other(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database(DbError::Other(_)) | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(_) => {
                tracing::warn!("Database constraint error: {}", self);
            }
            Error::Unauthenticated { .. } => {
                tracing::info!("Authentication error: {}", self);
            }
            Error::Validation { .. } | Error::QuotaExceeded { .. } | Error::BadRequest { .. } | Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();

        match &self {
            // Field-level validation failures carry the offending field in a structured body
            Error::Validation { field, .. } => {
                use serde_json::json;
                let body = json!({
                    "message": self.user_message(),
                    "field": field,
                });
                (status, axum::response::Json(body)).into_response()
            }
            // Unique violations identify the conflicting resource
            Error::Database(DbError::UniqueViolation { constraint, table, .. }) => {
                use serde_json::json;
                let resource = match (table.as_deref(), constraint.as_deref()) {
                    (Some("users"), _) => "user",
                    (Some("packages"), _) => "package",
                    (Some("user_sessions"), _) => "session",
                    _ => "unknown",
                };
                let body = json!({
                    "message": self.user_message(),
                    "resource": resource,
                });
                (status, axum::response::Json(body)).into_response()
            }
            _ => {
                let user_message = self.user_message();
                (status, user_message).into_response()
            }
        }
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::Unauthenticated { message: None }.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            Error::Validation {
                field: "port",
                message: "out of range".to_string()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::QuotaExceeded {
                resource: "cameras",
                limit: 4
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::NotFound {
                resource: "camera",
                id: "abc".to_string()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(Error::Database(DbError::NotFound).status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_quota_message_names_limit() {
        let err = Error::QuotaExceeded {
            resource: "faces",
            limit: 5,
        };
        assert!(err.user_message().contains('5'));
        assert!(err.user_message().contains("faces"));
    }

    #[test]
    fn test_internal_message_is_opaque() {
        let err = Error::Internal {
            operation: "connect to postgres at 10.0.0.3".to_string(),
        };
        assert_eq!(err.user_message(), "Internal server error");
    }

    #[test]
    fn test_duplicate_email_message() {
        let err = Error::Database(DbError::UniqueViolation {
            constraint: Some("users_email_key".to_string()),
            table: Some("users".to_string()),
            message: "duplicate key".to_string(),
        });
        assert_eq!(err.user_message(), "An account with this email address already exists");
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }
}
