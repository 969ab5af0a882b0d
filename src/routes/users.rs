use actix_web::{HttpResponse, Result as ActixResult, web};

use crate::middlewares::{RequireJWT, TeacherOrReadOnly};
use crate::models::ListParams;
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest};
use crate::services::UserService;
use crate::utils::SafeIDI64;

pub async fn list_users(
    service: web::Data<UserService>,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    service.list_users(query.into_inner()).await
}

pub async fn create_user(
    service: web::Data<UserService>,
    user_data: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    service.create_user(user_data.into_inner()).await
}

pub async fn get_user(
    service: web::Data<UserService>,
    user_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    service.get_user(user_id.0).await
}

pub async fn update_user(
    service: web::Data<UserService>,
    user_id: SafeIDI64,
    update_data: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    service
        .update_user(user_id.0, update_data.into_inner())
        .await
}

// 配置路由：读取需登录，写入需 is_staff
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .wrap(TeacherOrReadOnly)
            .wrap(RequireJWT)
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::patch().to(update_user)),
    );
}
