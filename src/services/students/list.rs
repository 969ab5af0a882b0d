use actix_web::{HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ListParams};
use crate::services::internal_error;

pub async fn list_students(
    service: &StudentService,
    params: ListParams,
) -> ActixResult<HttpResponse> {
    match service.storage().list_students_with_pagination(params).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Students retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list students", &e)),
    }
}
