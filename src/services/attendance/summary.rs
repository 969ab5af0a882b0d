use actix_web::{HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::ApiResponse;
use crate::services::internal_error;

/// 全部考勤记录的状态统计，空表时各项均为 0
pub async fn get_summary(service: &AttendanceService) -> ActixResult<HttpResponse> {
    match service.storage().get_attendance_summary().await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "Attendance summary retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to summarize attendance", &e)),
    }
}
