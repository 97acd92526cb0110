use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use willpower_core::errors::{Error as CoreError, ErrorKind};

pub const CODE_VALIDATION: u32 = 40001;
pub const CODE_INVALID_CREDENTIALS: u32 = 40101;
pub const CODE_UNAUTHORIZED: u32 = 40102;
pub const CODE_NOT_FOUND: u32 = 40401;
pub const CODE_CONFLICT: u32 = 40901;
pub const CODE_INTERNAL: u32 = 50001;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u32,
    message: String,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, u32, String) {
        match self {
            ApiError::Core(e) => match e.kind() {
                ErrorKind::Validation => (StatusCode::BAD_REQUEST, CODE_VALIDATION, e.to_string()),
                ErrorKind::NotFound => (StatusCode::NOT_FOUND, CODE_NOT_FOUND, e.to_string()),
                ErrorKind::Conflict => (StatusCode::CONFLICT, CODE_CONFLICT, conflict_message(e)),
                ErrorKind::Internal => internal(),
            },
            ApiError::BadRequest(reason) => {
                (StatusCode::BAD_REQUEST, CODE_VALIDATION, reason.clone())
            }
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                CODE_INVALID_CREDENTIALS,
                self.to_string(),
            ),
            ApiError::Unauthorized(reason) => {
                (StatusCode::UNAUTHORIZED, CODE_UNAUTHORIZED, reason.clone())
            }
            ApiError::Internal(_) => internal(),
        }
    }
}

fn internal() -> (StatusCode, u32, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        CODE_INTERNAL,
        "Internal server error".to_string(),
    )
}

fn conflict_message(e: &CoreError) -> String {
    match e {
        CoreError::Conflict(reason) => reason.clone(),
        other => other.to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(ErrorBody { code, message });
        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid input: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(format!("Invalid query: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::BadRequest("Invalid goal id".to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use willpower_core::errors::{DatabaseError, ValidationError};

    #[test]
    fn core_errors_map_to_codes() {
        let cases = [
            (
                ApiError::from(CoreError::from(ValidationError::InvalidInput("x".into()))),
                StatusCode::BAD_REQUEST,
                CODE_VALIDATION,
            ),
            (
                ApiError::from(CoreError::NotFound("Goal".into())),
                StatusCode::NOT_FOUND,
                CODE_NOT_FOUND,
            ),
            (
                ApiError::from(CoreError::Conflict("Username already exists".into())),
                StatusCode::CONFLICT,
                CODE_CONFLICT,
            ),
            (
                ApiError::from(CoreError::from(DatabaseError::QueryFailed(
                    "disk I/O error".into(),
                ))),
                StatusCode::INTERNAL_SERVER_ERROR,
                CODE_INTERNAL,
            ),
        ];
        for (err, status, code) in cases {
            let (got_status, got_code, _) = err.parts();
            assert_eq!((got_status, got_code), (status, code));
        }
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = ApiError::from(CoreError::from(DatabaseError::QueryFailed(
            "no such table: goals".into(),
        )));
        let (_, _, message) = err.parts();
        assert_eq!(message, "Internal server error");
    }
}
