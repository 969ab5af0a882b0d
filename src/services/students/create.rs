use actix_web::{HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::ApiResponse;
use crate::models::students::requests::StudentPayload;
use crate::services::{internal_error, validation_error};

pub async fn create_student(
    service: &StudentService,
    payload: StudentPayload,
) -> ActixResult<HttpResponse> {
    let student = match payload.validate_full() {
        Ok(student) => student,
        Err(errors) => return Ok(validation_error(errors)),
    };

    match service.storage().create_student(student).await {
        Ok(student) => {
            info!("Student {} ({}) created", student.id, student.admission_number);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                student,
                "Student created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create student", &e)),
    }
}
