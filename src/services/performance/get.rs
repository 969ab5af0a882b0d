use actix_web::{HttpResponse, Result as ActixResult};

use super::PerformanceService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, not_found};

pub async fn get_performance(
    service: &PerformanceService,
    record_id: i64,
) -> ActixResult<HttpResponse> {
    match service.storage().get_performance_by_id(record_id).await {
        Ok(Some(record)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            record,
            "Performance record retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::PerformanceNotFound)),
        Err(e) => Ok(internal_error("Failed to get performance record", &e)),
    }
}
