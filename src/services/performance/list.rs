use actix_web::{HttpResponse, Result as ActixResult};

use super::PerformanceService;
use crate::models::{ApiResponse, ListParams};
use crate::services::internal_error;

pub async fn list_performance(
    service: &PerformanceService,
    params: ListParams,
) -> ActixResult<HttpResponse> {
    match service
        .storage()
        .list_performance_with_pagination(params)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Performance records retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list performance records", &e)),
    }
}
