use actix_web::{HttpResponse, Result as ActixResult};

use super::PerformanceService;
use crate::models::ApiResponse;
use crate::services::internal_error;

pub async fn get_summary(service: &PerformanceService) -> ActixResult<HttpResponse> {
    match service.storage().get_performance_summary().await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "Performance summary retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to summarize performance", &e)),
    }
}
