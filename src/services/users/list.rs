use actix_web::{HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, ListParams};
use crate::services::internal_error;

pub async fn list_users(service: &UserService, params: ListParams) -> ActixResult<HttpResponse> {
    match service.storage().list_users_with_pagination(params).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Users retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list users", &e)),
    }
}
