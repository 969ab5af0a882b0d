//! 业务服务层
//!
//! 每个资源一个服务对象，持有注入的存储层；处理函数按操作拆分到子模块。

pub mod attendance;
pub mod auth;
pub mod performance;
pub mod students;
pub mod users;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use performance::PerformanceService;
pub use students::StudentService;
pub use users::UserService;

use actix_web::HttpResponse;
use std::sync::Arc;
use tracing::error;

use crate::errors::TrackerError;
use crate::models::{ApiResponse, ErrorCode, FieldErrors, add_field_error};
use crate::storage::Storage;

/// 字段级校验失败 → 400
pub(crate) fn validation_error(errors: FieldErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error(
        ErrorCode::ValidationFailed,
        errors,
        "Validation failed",
    ))
}

pub(crate) fn not_found(code: ErrorCode) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, "Not found."))
}

pub(crate) fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Authentication credentials were not provided.",
    ))
}

pub(crate) fn internal_error(context: &str, err: &TrackerError) -> HttpResponse {
    error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{context}: {}", err.message()),
    ))
}

fn missing_student_error(student_id: i64) -> FieldErrors {
    let mut errors = FieldErrors::new();
    add_field_error(
        &mut errors,
        "student",
        format!("Invalid pk \"{student_id}\" - object does not exist."),
    );
    errors
}

/// 校验请求中引用的学生存在，不存在时返回 400 字段错误
pub(crate) async fn ensure_student_exists(
    storage: &Arc<dyn Storage>,
    student_id: Option<i64>,
) -> Result<(), HttpResponse> {
    let Some(student_id) = student_id else {
        return Ok(());
    };
    match storage.student_exists(student_id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(validation_error(missing_student_error(student_id))),
        Err(e) => Err(internal_error("Failed to check student", &e)),
    }
}

/// 写入失败的统一处理：外键失败（学生在校验后被删除）按字段错误返回
pub(crate) fn write_error(context: &str, student_id: Option<i64>, err: &TrackerError) -> HttpResponse {
    match student_id {
        Some(id) if err.is_foreign_key_violation() => validation_error(missing_student_error(id)),
        _ => internal_error(context, err),
    }
}
