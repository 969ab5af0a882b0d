use actix_web::{HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{ApiResponse, ListParams};
use crate::services::internal_error;

pub async fn list_attendance(
    service: &AttendanceService,
    params: ListParams,
) -> ActixResult<HttpResponse> {
    match service
        .storage()
        .list_attendance_with_pagination(params)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Attendance records retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list attendance records", &e)),
    }
}
