use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::middlewares::RequireJWT;
use crate::models::auth::{RefreshTokenResponse, UserInfoResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, unauthorized};
use crate::utils::jwt::JwtUtils;

fn login_expired() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Login expired or invalid, please login again",
    ))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(unauthorized());
    };

    let (user_id, access_token) = match JwtUtils::refresh_access_token(&refresh_token) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!("Refresh token rejected: {}", e);
            return Ok(login_expired());
        }
    };

    // 账号被删除或停用后 refresh token 不再有效
    match service.storage().get_user_by_id(user_id).await {
        Ok(Some(user)) if user.is_active => {}
        Ok(_) => return Ok(login_expired()),
        Err(e) => return Ok(internal_error("Failed to refresh token", &e)),
    }

    let response = RefreshTokenResponse {
        access_token,
        expires_in: JwtUtils::access_token_ttl_seconds(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Token refreshed successfully",
    )))
}

pub async fn handle_get_user(request: &HttpRequest) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_user(request) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "User information retrieved successfully",
        ))),
        None => Ok(unauthorized()),
    }
}
