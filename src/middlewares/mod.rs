pub mod rate_limit;
pub mod require_jwt;
pub mod teacher_or_read_only;

pub use rate_limit::RateLimit;
pub use require_jwt::RequireJWT;
pub use teacher_or_read_only::TeacherOrReadOnly;

use actix_web::{HttpResponse, http::StatusCode, http::header::CONTENT_TYPE};

use crate::models::{ApiResponse, ErrorCode};

// 辅助函数：创建 JSON 错误响应
pub(crate) fn create_error_response(
    status: StatusCode,
    code: ErrorCode,
    message: &str,
) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .json(ApiResponse::<()>::error_empty(code, message))
}
