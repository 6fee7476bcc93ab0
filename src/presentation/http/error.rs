// src/presentation/http/error.rs
use crate::application::{
    ApplicationResult,
    error::{ApplicationError, ErrorKind},
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    pub fn from_error(err: ApplicationError) -> Self {
        let status = match err.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict | ErrorKind::VersionConflict => StatusCode::CONFLICT,
            ErrorKind::Contention => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Internal => {
                error!(error = %err, "request failed");
                return Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error".into());
            }
        };
        Self::new(status, err.to_string())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message.into())
    }

    fn new(status: StatusCode, message: String) -> Self {
        Self { status, message }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let payload = ErrorBody {
            error: self
                .status
                .canonical_reason()
                .unwrap_or("error")
                .to_string(),
            message: self.message,
        };
        (self.status, Json(payload)).into_response()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

pub type HttpResult<T> = Result<T, HttpError>;

pub trait IntoHttpResult<T> {
    fn into_http(self) -> HttpResult<T>;
}

impl<T> IntoHttpResult<T> for ApplicationResult<T> {
    fn into_http(self) -> HttpResult<T> {
        self.map_err(HttpError::from_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (DomainError::validation("slug", "bad"), StatusCode::BAD_REQUEST),
            (DomainError::not_found("faq", 3), StatusCode::NOT_FOUND),
            (DomainError::conflict("faq", "slug", "taken"), StatusCode::CONFLICT),
            (
                DomainError::VersionConflict {
                    entity_type: "faq".into(),
                    id: 3,
                    expected: 1,
                    actual: 2,
                },
                StatusCode::CONFLICT,
            ),
            (DomainError::Contention("busy".into()), StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (err, status) in cases {
            assert_eq!(HttpError::from_error(err.into()).status, status);
        }
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = HttpError::from_error(DomainError::Persistence("disk full".into()).into());
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "internal error");
    }
}
