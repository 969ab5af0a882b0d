use actix_web::{HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, not_found};

pub async fn get_user(service: &UserService, user_id: i64) -> ActixResult<HttpResponse> {
    match service.storage().get_user_by_id(user_id).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            user,
            "User retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::UserNotFound)),
        Err(e) => Ok(internal_error("Failed to get user", &e)),
    }
}
