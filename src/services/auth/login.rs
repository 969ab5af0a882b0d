use actix_web::{HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::AuthService;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

fn login_failed() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Username or password is incorrect",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.storage();

    // 1. 根据用户名获取用户
    let user = match storage.get_user_by_username(&login_request.username).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(login_failed()),
        Err(e) => {
            error!("Login lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Login failed: {}", e.message()),
                )),
            );
        }
    };

    // 2. 验证密码，停用账号与密码错误同样处理
    if !user.is_active || !verify_password(&login_request.password, &user.password_hash) {
        warn!("Failed login attempt for {}", login_request.username);
        return Ok(login_failed());
    }

    // 3. 更新最后登录时间，失败不影响登录
    if let Err(e) = storage.update_last_login(user.id).await {
        warn!("Failed to update last login for user {}: {}", user.id, e);
    }

    // 4. 生成令牌对
    let token_pair = match user.generate_token_pair() {
        Ok(pair) => pair,
        Err(e) => {
            error!("{}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            );
        }
    };

    info!("User {} logged in successfully", user.username);
    let refresh_cookie = JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);
    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: JwtUtils::access_token_ttl_seconds(),
        user,
        created_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}
