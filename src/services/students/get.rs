use actix_web::{HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, not_found};

pub async fn get_student(service: &StudentService, student_id: i64) -> ActixResult<HttpResponse> {
    match service.storage().get_student_by_id(student_id).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound)),
        Err(e) => Ok(internal_error("Failed to get student", &e)),
    }
}
