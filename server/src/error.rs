use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use foodgram_core::{DomainError, ExportError, PairingError, ShortLinkError};
use thiserror::Error;

use crate::api::ErrorResponse;

/// Error returned by every handler.
///
/// `Internal` carries only the client-facing message; the cause is logged
/// where the error is converted.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::Domain(DomainError::NotFound(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain(DomainError::Validation { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::AuthenticationRequired) => StatusCode::UNAUTHORIZED,
            ApiError::Domain(DomainError::PermissionDenied(_)) => StatusCode::FORBIDDEN,
            ApiError::Domain(DomainError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Domain(DomainError::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<DieselError> for ApiError {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::NotFound => ApiError::not_found("Not found"),
            e => {
                tracing::error!("Database query failed: {}", e);
                ApiError::internal("Database query failed")
            }
        }
    }
}

impl<E: Display> From<PairingError<E>> for ApiError {
    fn from(e: PairingError<E>) -> Self {
        match e {
            PairingError::Domain(d) => ApiError::Domain(d),
            PairingError::Storage(e) => {
                tracing::error!("Failed to update pairing: {}", e);
                ApiError::internal("Failed to update relation")
            }
        }
    }
}

impl<E: Display> From<ShortLinkError<E>> for ApiError {
    fn from(e: ShortLinkError<E>) -> Self {
        match e {
            ShortLinkError::Domain(d) => ApiError::Domain(d),
            e => {
                tracing::error!("Short link failure: {}", e);
                ApiError::internal("Failed to generate short link")
            }
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::UnsupportedFormat(format) => ApiError::Domain(DomainError::validation(
                "format",
                format!("Unsupported export format: {}", format),
            )),
            e => {
                tracing::error!("Failed to render shopping list: {}", e);
                ApiError::internal("Failed to generate file")
            }
        }
    }
}

/// Unique violations are expected outcomes on pairing tables, not faults.
pub fn is_unique_violation(e: &DieselError) -> bool {
    matches!(
        e,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

pub fn is_foreign_key_violation(e: &DieselError) -> bool {
    matches!(
        e,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    )
}
