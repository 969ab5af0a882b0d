use actix_web::{HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::UserService;
use crate::models::users::requests::CreateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::validation_error;
use crate::utils::password::hash_password;

pub async fn create_user(
    service: &UserService,
    mut user_data: CreateUserRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = user_data.validate() {
        return Ok(validation_error(errors));
    }

    user_data.password = match hash_password(&user_data.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Password hashing failed",
                )),
            );
        }
    };

    match service.storage().create_user(user_data).await {
        Ok(user) => {
            info!("User {} created (staff: {})", user.username, user.is_staff);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "User created successfully")))
        }
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "Username or email already exists",
            ),
        )),
        Err(e) => {
            error!("User creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserCreationFailed,
                    format!("User creation failed: {}", e.message()),
                )),
            )
        }
    }
}
