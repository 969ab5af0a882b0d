use actix_web::{HttpResponse, Result as ActixResult};

use super::PerformanceService;
use crate::models::ErrorCode;
use crate::services::{internal_error, not_found};

pub async fn delete_performance(
    service: &PerformanceService,
    record_id: i64,
) -> ActixResult<HttpResponse> {
    match service.storage().delete_performance(record_id).await {
        Ok(true) => Ok(HttpResponse::NoContent().finish()),
        Ok(false) => Ok(not_found(ErrorCode::PerformanceNotFound)),
        Err(e) => Ok(internal_error("Failed to delete performance record", &e)),
    }
}
