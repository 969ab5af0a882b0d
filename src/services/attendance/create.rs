use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AttendanceService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::attendance::requests::AttendancePayload;
use crate::services::{ensure_student_exists, unauthorized, validation_error, write_error};

pub async fn create_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    payload: AttendancePayload,
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
        .create_attendance(record, recorder_id)
        .await
    {
        Ok(record) => {
            info!(
                "Attendance {} for student {} recorded by user {}",
                record.id, record.student, recorder_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                record,
                "Attendance record created successfully",
            )))
        }
        Err(e) => Ok(write_error(
            "Failed to create attendance record",
            Some(student_id),
            &e,
        )),
    }
}
