/*!
 * JWT 认证中间件
 *
 * 所有业务接口都要求登录，本中间件负责把请求关联到一个有效的用户。
 *
 * ## 认证流程
 *
 * 1. 客户端在请求头中包含 `Authorization: Bearer <ACCESS_TOKEN>`
 * 2. 校验签名、过期时间以及 token 类型（必须是 access token）
 * 3. 按 `user:{id}` 先查缓存，未命中再查存储层，并写回缓存
 * 4. 用户不存在或已停用 → 401
 * 5. 成功时将 `User` 放入请求扩展，供权限中间件和处理程序使用
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * web::scope("/students")
 *     .wrap(TeacherOrReadOnly)
 *     .wrap(RequireJWT) // 最后 wrap 的最先执行
 * ```
 */

use crate::cache::{CacheResult, ObjectCache, user_cache_key};
use crate::middlewares::create_error_response;
use crate::models::{ErrorCode, users::entities::User};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

const BEARER_PREFIX: &str = "Bearer ";

pub const MSG_NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";

#[derive(Clone)]
pub struct RequireJWT;

enum AuthFailure {
    Unauthorized(String),
    Internal(String),
}

/// 从请求中取出 Bearer token
fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

async fn load_user(
    storage: &Arc<dyn Storage>,
    cache: &Arc<dyn ObjectCache>,
    user_id: i64,
) -> Result<User, AuthFailure> {
    let key = user_cache_key(user_id);

    match cache.get_raw(&key).await {
        CacheResult::Found(json) => match serde_json::from_str::<User>(&json) {
            Ok(user) => return Ok(user),
            Err(e) => {
                info!("Dropping undecodable cache entry {}: {}", key, e);
                cache.remove(&key).await;
            }
        },
        CacheResult::NotFound => debug!("User {} not found in cache", user_id),
        CacheResult::ExistsButNoValue => debug!("Cache unavailable, loading user {}", user_id),
    }

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| AuthFailure::Internal(format!("Failed to load user: {e}")))?
        .ok_or_else(|| AuthFailure::Unauthorized("User not found".to_string()))?;

    // password_hash 不参与序列化，缓存中的用户只用于鉴权
    if let Ok(json) = serde_json::to_string(&user) {
        cache.insert_raw(key, json, 0).await;
    }

    Ok(user)
}

async fn authenticate(req: &ServiceRequest) -> Result<User, AuthFailure> {
    let token = bearer_token(req)
        .ok_or_else(|| AuthFailure::Unauthorized(MSG_NOT_AUTHENTICATED.to_string()))?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AuthFailure::Unauthorized("Given token not valid for any token type".to_string())
    })?;
    let user_id = claims
        .user_id()
        .ok_or_else(|| AuthFailure::Unauthorized("Invalid user ID in token".to_string()))?;

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| AuthFailure::Internal("Storage not registered".to_string()))?;
    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| AuthFailure::Internal("Cache not registered".to_string()))?;

    let user = load_user(&storage, &cache, user_id).await?;
    if !user.is_active {
        return Err(AuthFailure::Unauthorized("User is inactive".to_string()));
    }
    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            match authenticate(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(AuthFailure::Unauthorized(msg)) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        msg
                    );
                    Ok(req.into_response(
                        create_error_response(StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, &msg)
                            .map_into_right_body(),
                    ))
                }
                Err(AuthFailure::Internal(msg)) => {
                    error!("Authentication error for {}: {}", req.path(), msg);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "Internal server error",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 从请求扩展中提取当前用户
    pub fn extract_user(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    /// 从请求扩展中提取用户ID
    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }
}
