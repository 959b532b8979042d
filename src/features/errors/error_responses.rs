use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::json;

use crate::data::models::{ApiError, LoginError, RegisterError};

const INTERNAL: &str = "Internal server error";

fn error_body(status: StatusCode, message: String) -> Response {
    let body = json!({
        "error": message,
        "status": status.as_u16()
    });

    (status, axum::Json(body)).into_response()
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            LoginError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            other => {
                log::error!("Login failed: {:?}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL.to_string())
            }
        };
        error_body(status, message)
    }
}

impl IntoResponse for RegisterError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            RegisterError::UsernameTaken => (StatusCode::CONFLICT, self.to_string()),
            // Lost a race with a concurrent registration of the same name
            RegisterError::DatabaseError(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                (StatusCode::CONFLICT, RegisterError::UsernameTaken.to_string())
            }
            other => {
                log::error!("Registration failed: {:?}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL.to_string())
            }
        };
        error_body(status, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, e),
            ApiError::Conflict(e) => (StatusCode::CONFLICT, e),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::Database(DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation | DatabaseErrorKind::UniqueViolation,
                info,
            )) => {
                log::warn!("Constraint violation: {}", info.message());
                (StatusCode::CONFLICT, "Conflicts with existing data".to_string())
            }
            other => {
                log::error!("Request failed: {:?}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL.to_string())
            }
        };
        error_body(status, message)
    }
}
