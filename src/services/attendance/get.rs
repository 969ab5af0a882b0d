use actix_web::{HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, not_found};

pub async fn get_attendance(
    service: &AttendanceService,
    record_id: i64,
) -> ActixResult<HttpResponse> {
    match service.storage().get_attendance_by_id(record_id).await {
        Ok(Some(record)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            record,
            "Attendance record retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::AttendanceNotFound)),
        Err(e) => Ok(internal_error("Failed to get attendance record", &e)),
    }
}
