use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{RateLimit, RequireJWT};
use crate::models::auth::LoginRequest;
use crate::services::AuthService;

pub async fn login(
    service: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    service.login(login_data.into_inner()).await
}

pub async fn refresh_token(
    service: web::Data<AuthService>,
    request: HttpRequest,
) -> ActixResult<HttpResponse> {
    service.refresh_token(&request).await
}

pub async fn get_user(
    service: web::Data<AuthService>,
    request: HttpRequest,
) -> ActixResult<HttpResponse> {
    service.get_user(&request).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig, login_limit: RateLimit) {
    cfg.service(
        web::scope("/api/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limit)
                    .route(web::post().to(login)),
            )
            .route("/refresh", web::post().to(refresh_token))
            .service(
                web::scope("")
                    .wrap(RequireJWT)
                    .route("/me", web::get().to(get_user)),
            ),
    );
}
