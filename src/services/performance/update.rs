use actix_web::{HttpResponse, Result as ActixResult};

use super::PerformanceService;
use crate::models::performance::requests::{PerformanceChanges, PerformancePayload};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{ensure_student_exists, not_found, validation_error, write_error};

pub async fn update_performance(
    service: &PerformanceService,
    record_id: i64,
    payload: PerformancePayload,
    partial: bool,
) -> ActixResult<HttpResponse> {
    // PUT 省略 date_recorded 时保留原日期
    let validated = if partial {
        payload.validate_partial()
    } else {
        payload.validate_full().map(PerformanceChanges::from)
    };
    let changes = match validated {
        Ok(changes) => changes,
        Err(errors) => return Ok(validation_error(errors)),
    };
    if let Err(resp) = ensure_student_exists(service.storage(), changes.student_id).await {
        return Ok(resp);
    }

    let student_id = changes.student_id;
    match service
        .storage()
        .update_performance(record_id, changes)
        .await
    {
        Ok(Some(record)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            record,
            "Performance record updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::PerformanceNotFound)),
        Err(e) => Ok(write_error(
            "Failed to update performance record",
            student_id,
            &e,
        )),
    }
}
