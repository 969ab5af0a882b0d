use actix_web::{HttpResponse, Result as ActixResult};
use tracing::error;

use super::UserService;
use crate::cache::user_cache_key;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, not_found, validation_error};
use crate::utils::password::hash_password;

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = update_data.validate() {
        return Ok(validation_error(errors));
    }

    if let Some(password) = update_data.password.take() {
        match hash_password(&password) {
            Ok(hash) => update_data.password = Some(hash),
            Err(e) => {
                error!("Password hashing failed: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Password hashing failed",
                    )),
                );
            }
        }
    }

    match service.storage().update_user(user_id, update_data).await {
        Ok(Some(user)) => {
            // 中间件缓存的用户可能已过时（is_staff / is_active）
            service.cache().remove(&user_cache_key(user_id)).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "User updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::UserNotFound)),
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::UserAlreadyExists, "Email already exists"),
        )),
        Err(e) => Ok(internal_error("Failed to update user", &e)),
    }
}
