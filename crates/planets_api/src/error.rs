//! Boundary error type and its HTTP rendering.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use planets_core::{PlanetServiceError, PlanetValidationError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable snake_case error code.
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

/// Request failure as seen by HTTP clients.
#[derive(Debug)]
pub enum ApiError {
    /// Create payload has a blank required field. Maps to 422.
    Validation(PlanetValidationError),
    /// Name is already taken. Maps to 409.
    DuplicateName(String),
    /// Target planet does not exist. Maps to 404.
    NotFound(String),
    /// Body, path or query could not be extracted. Keeps the extractor's status.
    InvalidRequest { status: StatusCode, message: String },
    /// Storage or runtime failure. Maps to 500; details stay in the logs.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::DuplicateName(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidRequest { status, .. } => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::DuplicateName(_) => "duplicate_name",
            Self::NotFound(_) => "not_found",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Internal(_) => "internal_error",
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateName(name) => write!(f, "planet name already exists: `{name}`"),
            Self::NotFound(message) => write!(f, "{message}"),
            Self::InvalidRequest { message, .. } => write!(f, "{message}"),
            Self::Internal(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code().to_string(),
            message: self.public_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<PlanetValidationError> for ApiError {
    fn from(value: PlanetValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PlanetServiceError> for ApiError {
    fn from(value: PlanetServiceError) -> Self {
        match value {
            PlanetServiceError::Validation(err) => Self::Validation(err),
            PlanetServiceError::DuplicateName(name) => Self::DuplicateName(name),
            PlanetServiceError::NotFound(id) => Self::NotFound(format!("planet not found: {id}")),
            PlanetServiceError::Storage(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::InvalidRequest {
            status: value.status(),
            message: value.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::InvalidRequest {
            status: value.status(),
            message: value.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::InvalidRequest {
            status: value.status(),
            message: value.body_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use planets_core::{PlanetServiceError, PlanetValidationError, RepoError};

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (
                PlanetServiceError::Validation(PlanetValidationError::EmptyField("name")),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                PlanetServiceError::DuplicateName("Earth".to_string()),
                StatusCode::CONFLICT,
            ),
            (PlanetServiceError::NotFound(3), StatusCode::NOT_FOUND),
            (
                PlanetServiceError::Storage(RepoError::InvalidData("bad row".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let err = ApiError::Internal("disk I/O error at /var/db".to_string());
        assert_eq!(err.public_message(), "internal server error");
        assert_eq!(err.code(), "internal_error");
    }
}
