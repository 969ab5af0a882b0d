use actix_web::{HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::students::requests::{StudentChanges, StudentPayload};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, not_found, validation_error};

pub async fn update_student(
    service: &StudentService,
    student_id: i64,
    payload: StudentPayload,
    partial: bool,
) -> ActixResult<HttpResponse> {
    let validated = if partial {
        payload.validate_partial()
    } else {
        payload.validate_full().map(StudentChanges::from)
    };
    let changes = match validated {
        Ok(changes) => changes,
        Err(errors) => return Ok(validation_error(errors)),
    };

    match service.storage().update_student(student_id, changes).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound)),
        Err(e) => Ok(internal_error("Failed to update student", &e)),
    }
}
