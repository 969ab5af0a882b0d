use actix_web::{HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::ErrorCode;
use crate::services::{internal_error, not_found};

pub async fn delete_attendance(
    service: &AttendanceService,
    record_id: i64,
) -> ActixResult<HttpResponse> {
    match service.storage().delete_attendance(record_id).await {
        Ok(true) => Ok(HttpResponse::NoContent().finish()),
        Ok(false) => Ok(not_found(ErrorCode::AttendanceNotFound)),
        Err(e) => Ok(internal_error("Failed to delete attendance record", &e)),
    }
}
