/*!
 * 读写权限中间件
 *
 * - 安全方法（GET / HEAD / OPTIONS）：任何已登录用户
 * - 其他方法（POST / PUT / PATCH / DELETE）：仅 is_staff 用户
 *
 * 必须放在 `RequireJWT` 之内（先 wrap 本中间件，再 wrap `RequireJWT`）。
 */

use crate::middlewares::create_error_response;
use crate::middlewares::require_jwt::MSG_NOT_AUTHENTICATED;
use crate::models::{ErrorCode, users::entities::User};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, StatusCode},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

pub const MSG_PERMISSION_DENIED: &str = "You do not have permission to perform this action.";

/// 权限判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    Allow,
    Unauthenticated,
    Forbidden,
}

pub fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// 判定请求是否允许
pub fn evaluate(method: &Method, user: Option<&User>) -> PermissionDecision {
    match user {
        None => PermissionDecision::Unauthenticated,
        Some(_) if is_safe_method(method) => PermissionDecision::Allow,
        Some(user) if user.is_staff => PermissionDecision::Allow,
        Some(_) => PermissionDecision::Forbidden,
    }
}

#[derive(Clone)]
pub struct TeacherOrReadOnly;

impl<S, B> Transform<S, ServiceRequest> for TeacherOrReadOnly
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = TeacherOrReadOnlyMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TeacherOrReadOnlyMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct TeacherOrReadOnlyMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for TeacherOrReadOnlyMiddleware<S>
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
            let decision = evaluate(req.method(), req.extensions().get::<User>());

            match decision {
                PermissionDecision::Allow => Ok(srv.call(req).await?.map_into_left_body()),
                PermissionDecision::Unauthenticated => Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        MSG_NOT_AUTHENTICATED,
                    )
                    .map_into_right_body(),
                )),
                PermissionDecision::Forbidden => {
                    info!(
                        "Write access denied for non-staff user on {} {}",
                        req.method(),
                        req.path()
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::PermissionDenied,
                            MSG_PERMISSION_DENIED,
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_staff: bool) -> User {
        User {
            id: 1,
            username: "someone".to_string(),
            email: "someone@school.edu".to_string(),
            password_hash: String::new(),
            first_name: None,
            last_name: None,
            is_staff,
            is_active: true,
            last_login: None,
            date_joined: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_anonymous_denied_everything() {
        for method in [Method::GET, Method::POST, Method::DELETE] {
            assert_eq!(evaluate(&method, None), PermissionDecision::Unauthenticated);
        }
    }

    #[test]
    fn test_read_only_user() {
        let reader = user(false);
        assert_eq!(evaluate(&Method::GET, Some(&reader)), PermissionDecision::Allow);
        assert_eq!(evaluate(&Method::HEAD, Some(&reader)), PermissionDecision::Allow);
        for method in [Method::POST, Method::PUT, Method::PATCH, Method::DELETE] {
            assert_eq!(
                evaluate(&method, Some(&reader)),
                PermissionDecision::Forbidden
            );
        }
    }

    #[test]
    fn test_staff_may_write() {
        let teacher = user(true);
        for method in [Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE] {
            assert_eq!(evaluate(&method, Some(&teacher)), PermissionDecision::Allow);
        }
    }
}
