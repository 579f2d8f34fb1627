use axum::{
    extract::rejection::{BytesRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use students_core::storage::{repository_error_to_status_code, RepositoryError};
use students_core::student::ValidationErrors;

/// Errors a student handler can return.
///
/// Each variant maps to one status code; the body is always
/// `{"status": "Error", "error": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("empty body")]
    EmptyBody,
    #[error("{0}")]
    MalformedBody(String),
    #[error("{}", .0.body_text())]
    UnreadableBody(#[from] BytesRejection),
    #[error("invalid student id: {0}")]
    InvalidId(String),
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::EmptyBody
            | ApiError::MalformedBody(_)
            | ApiError::InvalidId(_)
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::UnreadableBody(rejection) => rejection.status(),
            ApiError::Repository(err) => {
                StatusCode::from_u16(repository_error_to_status_code(err))
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidId(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "API error");
        } else {
            tracing::warn!(status = %status, error = %self, "API error");
        }

        let error = match &self {
            ApiError::Validation(errors) => json!(errors),
            other => json!(other.to_string()),
        };

        (status, Json(json!({ "status": "Error", "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use students_core::student::{FieldError, FieldErrorKind};

    async fn body_json(response: Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_empty_body_response() {
        let response = ApiError::EmptyBody.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"status": "Error", "error": "empty body"})
        );
    }

    #[tokio::test]
    async fn test_validation_response_lists_fields() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldError::new("name", FieldErrorKind::Required));

        let response = ApiError::from(errors).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({
                "status": "Error",
                "error": [{"field": "name", "message": "field name is required"}]
            })
        );
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let response = ApiError::from(RepositoryError::student_not_found(9)).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"status": "Error", "error": "no student found with id: 9"})
        );
    }

    #[test]
    fn test_storage_failures_map_to_500() {
        let duplicate = ApiError::from(RepositoryError::AlreadyExists {
            entity_type: "student",
            field: "email".to_string(),
        });
        let query = ApiError::from(RepositoryError::query_failed("get students", "boom"));

        assert_eq!(duplicate.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(query.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
