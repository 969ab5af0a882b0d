use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{RequireJWT, TeacherOrReadOnly};
use crate::models::ListParams;
use crate::models::performance::requests::PerformancePayload;
use crate::services::PerformanceService;
use crate::utils::SafeIDI64;

pub async fn list_performance(
    service: web::Data<PerformanceService>,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    service.list_performance(query.into_inner()).await
}

pub async fn create_performance(
    service: web::Data<PerformanceService>,
    req: HttpRequest,
    payload: web::Json<PerformancePayload>,
) -> ActixResult<HttpResponse> {
    service
        .create_performance(&req, payload.into_inner())
        .await
}

pub async fn performance_summary(
    service: web::Data<PerformanceService>,
) -> ActixResult<HttpResponse> {
    service.get_summary().await
}

pub async fn get_performance(
    service: web::Data<PerformanceService>,
    record_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    service.get_performance(record_id.0).await
}

pub async fn update_performance(
    service: web::Data<PerformanceService>,
    record_id: SafeIDI64,
    payload: web::Json<PerformancePayload>,
) -> ActixResult<HttpResponse> {
    service
        .update_performance(record_id.0, payload.into_inner(), false)
        .await
}

pub async fn partial_update_performance(
    service: web::Data<PerformanceService>,
    record_id: SafeIDI64,
    payload: web::Json<PerformancePayload>,
) -> ActixResult<HttpResponse> {
    service
        .update_performance(record_id.0, payload.into_inner(), true)
        .await
}

pub async fn delete_performance(
    service: web::Data<PerformanceService>,
    record_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    service.delete_performance(record_id.0).await
}

// summary 必须注册在 /{id} 之前
pub fn configure_performance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/performance")
            .wrap(TeacherOrReadOnly)
            .wrap(RequireJWT)
            .route("", web::get().to(list_performance))
            .route("", web::post().to(create_performance))
            .route("/summary", web::get().to(performance_summary))
            .route("/{id}", web::get().to(get_performance))
            .route("/{id}", web::put().to(update_performance))
            .route("/{id}", web::patch().to(partial_update_performance))
            .route("/{id}", web::delete().to(delete_performance)),
    );
}
