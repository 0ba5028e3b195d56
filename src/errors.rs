use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

use crate::services::credentials::CredentialError;

/// Body of every error response.
#[derive(Serialize)]
pub struct ErrorResponse<'a> {
    pub code: &'a str,
    pub error: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    DbError(#[from] DbErr),

    #[error("Password hashing failed: {0}")]
    Credential(#[from] CredentialError),

    #[error("{0}")]
    MissingFields(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DbError(_) | AppError::Credential(_) | AppError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::MissingFields(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}: {}", self.code(), self);
        }
        let body = ErrorResponse {
            code: self.code(),
            error: self.to_string(),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DbError(_) => "DB_ERROR",
            AppError::Credential(_) => "CREDENTIAL_ERROR",
            AppError::MissingFields(_) => "MISSING_FIELDS",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Internal => "INTERNAL",
        }
    }

    /// Unique violations become `Conflict(message)`, dangling references
    /// become `InvalidInput`; every other database error passes through.
    pub fn on_constraint_violation(message: &str) -> impl FnOnce(DbErr) -> AppError + '_ {
        move |err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                log::info!("unique constraint violated: {}", detail);
                AppError::Conflict(message.to_string())
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                log::info!("foreign key constraint violated: {}", detail);
                AppError::InvalidInput("Referenced record does not exist".to_string())
            }
            _ => AppError::DbError(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_status_codes() {
        assert_eq!(
            AppError::MissingFields("All fields are required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::NotFound("User not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("Email already exists".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::DbError(DbErr::Custom("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_message_is_surfaced_raw() {
        let err = AppError::DbError(DbErr::Custom("connection refused".into()));
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(err.code(), "DB_ERROR");
    }

    #[test]
    fn other_errors_stay_database_errors() {
        let mapped = AppError::on_constraint_violation("Email already exists")(DbErr::Custom(
            "syntax error".into(),
        ));
        assert!(matches!(mapped, AppError::DbError(_)));
    }
}
