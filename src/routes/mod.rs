//! API 路由层
//!
//! 服务对象在启动时构造一次，以 `web::Data` 注册；各资源的 scope 在此组合。

pub mod attendance;
pub mod auth;
pub mod performance;
pub mod students;
pub mod users;

use actix_web::web;
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::middlewares::RateLimit;
use crate::services::{
    AttendanceService, AuthService, PerformanceService, StudentService, UserService,
};
use crate::storage::Storage;
use crate::utils::{json_error_handler, query_error_handler};

pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use performance::configure_performance_routes;
pub use students::configure_student_routes;
pub use users::configure_user_routes;

/// 组装全部 API：共享状态、参数错误处理器与各资源路由
///
/// 返回的闭包可在每个 worker 的 App 工厂中重复调用，所有 worker 共享同一组服务与限流计数。
pub fn configure_api(
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
) -> impl Fn(&mut web::ServiceConfig) + Clone + Send + 'static {
    let auth_service = web::Data::new(AuthService::new(storage.clone()));
    let user_service = web::Data::new(UserService::new(storage.clone(), cache.clone()));
    let student_service = web::Data::new(StudentService::new(storage.clone()));
    let attendance_service = web::Data::new(AttendanceService::new(storage.clone()));
    let performance_service = web::Data::new(PerformanceService::new(storage.clone()));
    let login_limit = RateLimit::login();

    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            // 中间件通过 app_data 读取存储与缓存
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(cache.clone()))
            .app_data(auth_service.clone())
            .app_data(user_service.clone())
            .app_data(student_service.clone())
            .app_data(attendance_service.clone())
            .app_data(performance_service.clone());

        configure_auth_routes(cfg, login_limit.clone());
        configure_user_routes(cfg);
        configure_student_routes(cfg);
        configure_attendance_routes(cfg);
        configure_performance_routes(cfg);
    }
}

#[cfg(test)]
mod tests;
