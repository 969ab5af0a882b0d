use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::PerformanceService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::performance::requests::PerformancePayload;
use crate::services::{ensure_student_exists, unauthorized, validation_error, write_error};

pub async fn create_performance(
    service: &PerformanceService,
    request: &HttpRequest,
    payload: PerformancePayload,
) -> ActixResult<HttpResponse> {
    let Some(recorder_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };

    let record = match payload.validate_full() {
        Ok(record) => record,
        Err(errors) => return Ok(validation_error(errors)),
    };
    if let Err(resp) = ensure_student_exists(service.storage(), Some(record.student_id)).await {
        return Ok(resp);
    }

    let student_id = record.student_id;
    match service
        .storage()
        .create_performance(record, recorder_id)
        .await
    {
        Ok(record) => {
            info!(
                "Performance {} ({}: {}) for student {} recorded by user {}",
                record.id, record.subject, record.score, record.student, recorder_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                record,
                "Performance record created successfully",
            )))
        }
        Err(e) => Ok(write_error(
            "Failed to create performance record",
            Some(student_id),
            &e,
        )),
    }
}
