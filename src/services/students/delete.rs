use actix_web::{HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::ErrorCode;
use crate::services::{internal_error, not_found};

pub async fn delete_student(
    service: &StudentService,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    match service.storage().delete_student(student_id).await {
        Ok(true) => {
            info!("Student {} deleted with its attendance and performance records", student_id);
            Ok(HttpResponse::NoContent().finish())
        }
        Ok(false) => Ok(not_found(ErrorCode::StudentNotFound)),
        Err(e) => Ok(internal_error("Failed to delete student", &e)),
    }
}
