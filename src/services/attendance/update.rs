use actix_web::{HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::{AttendanceChanges, AttendancePayload};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{ensure_student_exists, not_found, validation_error, write_error};

pub async fn update_attendance(
    service: &AttendanceService,
    record_id: i64,
    payload: AttendancePayload,
    partial: bool,
) -> ActixResult<HttpResponse> {
    let validated = if partial {
        payload.validate_partial()
    } else {
        payload.validate_full().map(AttendanceChanges::from)
    };
    let changes = match validated {
        Ok(changes) => changes,
        Err(errors) => return Ok(validation_error(errors)),
    };
    if let Err(resp) = ensure_student_exists(service.storage(), changes.student_id).await {
        return Ok(resp);
    }

    // recorded_by 不随更新改变
    let student_id = changes.student_id;
    match service
        .storage()
        .update_attendance(record_id, changes)
        .await
    {
        Ok(Some(record)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            record,
            "Attendance record updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::AttendanceNotFound)),
        Err(e) => Ok(write_error(
            "Failed to update attendance record",
            student_id,
            &e,
        )),
    }
}
