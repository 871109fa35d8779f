//! Errores de la aplicación
//!
//! AppError centraliza los fallos del sistema y su traducción a una
//! respuesta HTTP con cuerpo JSON uniforme.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),
}

/// Cuerpo JSON de toda respuesta de error
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) | AppError::Hash(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "DB_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::Jwt(_) => "JWT_ERROR",
            AppError::Hash(_) => "HASH_ERROR",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AppError::Database(_) => "Database Error",
            AppError::Validation(_) => "Validation Error",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Forbidden(_) => "Forbidden",
            AppError::NotFound(_) => "Not Found",
            AppError::Conflict(_) => "Conflict",
            AppError::BadRequest(_) => "Bad Request",
            AppError::Internal(_) => "Internal Server Error",
            AppError::Jwt(_) => "JWT Error",
            AppError::Hash(_) => "Hash Error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("{}", self);
        }

        // Los fallos internos no exponen su causa en message; va en details
        let (message, details) = match &self {
            AppError::Database(msg) => (
                "An error occurred while accessing the database".to_string(),
                Some(json!({ "sql_error": msg })),
            ),
            AppError::Validation(e) => {
                ("The provided data is invalid".to_string(), Some(json!(e)))
            }
            AppError::Internal(msg) => (
                "An unexpected error occurred".to_string(),
                Some(json!({ "internal_error": msg })),
            ),
            AppError::Hash(msg) => (
                "An error occurred while processing credentials".to_string(),
                Some(json!({ "hash_error": msg })),
            ),
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::BadRequest(msg)
            | AppError::Jwt(msg) => (msg.clone(), None),
        };

        let body = ErrorResponse {
            error: self.label().to_string(),
            message,
            details,
            code: Some(self.code().to_string()),
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Helper para denegaciones de autorización
pub fn forbidden_error(operation: &str, reason: &str) -> AppError {
    AppError::Forbidden(format!("Cannot {}: {}", operation, reason))
}

/// Helper para solicitudes incorrectas
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Conflict("x".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Database("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_forbidden_is_not_not_found() {
        // Un registro existente pero ajeno responde 403, nunca 404
        let forbidden = forbidden_error("update service record", "not assigned");
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_ne!(forbidden.status(), AppError::NotFound("x".into()).status());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Jwt("x".into()).code(), "JWT_ERROR");
        assert_eq!(
            AppError::Validation(validator::ValidationErrors::new()).code(),
            "VALIDATION_ERROR"
        );
    }
}
