//! 数据模型定义
//!
//! 与 `entity` 中的数据库实体分离，这里的类型直接决定 JSON 线上格式。

pub mod attendance;
pub mod auth;
pub mod common;
pub mod performance;
pub mod students;
pub mod users;

pub use common::{
    ApiResponse, FieldErrors, ListParams, PaginationInfo, PaginationQuery, add_field_error,
};

/// 响应中的业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证与授权
    Unauthorized = 2001,
    AuthFailed = 2002,
    PermissionDenied = 2003,

    // 用户
    UserNotFound = 3000,
    UserAlreadyExists = 3001,
    UserCreationFailed = 3002,

    // 学生
    StudentNotFound = 4000,

    // 考勤
    AttendanceNotFound = 4100,

    // 成绩
    PerformanceNotFound = 4200,
}
