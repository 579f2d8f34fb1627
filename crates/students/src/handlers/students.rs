//! Student CRUD handlers.
//!
//! Each handler makes exactly one repository call. Request bodies are read as
//! raw bytes so an empty body can be told apart from malformed JSON.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;

use students_core::student::Student;

use crate::{handlers::ApiError, state::AppState};

/// Response body for a created student.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Response body for a deleted student.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: String,
}

/// Decodes a request body into a JSON object.
fn decode_body(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::EmptyBody);
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::MalformedBody(e.to_string()))?;

    if !value.is_object() {
        return Err(ApiError::MalformedBody(
            "request body must be a JSON object".to_string(),
        ));
    }

    Ok(value)
}

/// Create a student (POST /api/students).
pub async fn create_student(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    tracing::debug!("Received create student request");

    let body = body?;
    let payload = decode_body(&body)?;
    let student = state.validator.validate(&payload)?;

    let id = state.student_repo.create_student(&student).await?;

    tracing::info!(student_id = id, "Created student");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Get a student by ID (GET /api/students/{id}).
pub async fn get_student(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Student>, ApiError> {
    let Path(id) = path?;
    tracing::debug!(student_id = id, "Received get student request");

    let student = state.student_repo.get_student_by_id(id).await?;

    Ok(Json(student))
}

/// List all students (GET /api/students).
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, ApiError> {
    tracing::debug!("Received list students request");

    let students = state.student_repo.get_students().await?;

    Ok(Json(students))
}

/// Update a student by ID (PUT /api/students/{id}).
///
/// All writable fields are replaced; the payload is validated like a create.
pub async fn update_student(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Student>, ApiError> {
    let Path(id) = path?;
    tracing::debug!(student_id = id, "Received update student request");

    let body = body?;
    let payload = decode_body(&body)?;
    let changes = state.validator.validate(&payload)?;

    let student = state
        .student_repo
        .update_student_by_id(id, &changes)
        .await?;

    tracing::info!(student_id = id, "Updated student");

    Ok(Json(student))
}

/// Delete a student by ID (DELETE /api/students/{id}).
pub async fn delete_student(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let Path(id) = path?;
    tracing::debug!(student_id = id, "Received delete student request");

    state.student_repo.delete_by_id(id).await?;

    tracing::info!(student_id = id, "Deleted student");

    Ok(Json(DeletedResponse {
        message: format!("successfully deleted student with id: {id}"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty_body() {
        assert!(matches!(decode_body(b""), Err(ApiError::EmptyBody)));
        assert!(matches!(decode_body(b"  \n"), Err(ApiError::EmptyBody)));
    }

    #[test]
    fn test_decode_malformed_body() {
        assert!(matches!(
            decode_body(b"{\"name\": "),
            Err(ApiError::MalformedBody(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_objects() {
        let result = decode_body(b"[1, 2, 3]");

        match result {
            Err(ApiError::MalformedBody(message)) => {
                assert_eq!(message, "request body must be a JSON object");
            }
            other => panic!("Expected MalformedBody, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_object() {
        let value = decode_body(br#"{"name": "Ana"}"#).unwrap();

        assert_eq!(value["name"], "Ana");
    }
}
