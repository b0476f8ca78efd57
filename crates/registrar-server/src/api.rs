//! Wire types for the student API.
//!
//! Request bodies keep the camelCase field names the API has always
//! exposed; errors come back as `{"detail": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use registrar_core::{Error, Grade, NewStudent};

// === Requests ===

/// Create-student request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentRequest {
    /// First name(s).
    pub names: String,
    /// Last name(s).
    #[serde(rename = "lastNames")]
    pub last_names: String,
    /// Initial grades, at most four.
    #[serde(default)]
    pub grades: Vec<Grade>,
}

impl From<CreateStudentRequest> for NewStudent {
    fn from(req: CreateStudentRequest) -> Self {
        Self::new(req.names, req.last_names, req.grades)
    }
}

/// Grades-replacement request body.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGradesRequest {
    /// The full replacement grades list, at most four.
    #[serde(default)]
    pub grades: Vec<Grade>,
}

// === Responses ===

/// Health-check payload.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service display name.
    pub message: String,
    /// Package version.
    pub version: String,
}

/// Error body returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable failure description.
    pub detail: String,
}

/// Wrapper mapping store errors onto HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Validation { .. } | Error::Conflict { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if !self.0.is_client_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        let body = Json(ErrorBody {
            detail: self.0.to_string(),
        });
        (status, body).into_response()
    }
}
