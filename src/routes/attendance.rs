use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{RequireJWT, TeacherOrReadOnly};
use crate::models::ListParams;
use crate::models::attendance::requests::AttendancePayload;
use crate::services::AttendanceService;
use crate::utils::SafeIDI64;

pub async fn list_attendance(
    service: web::Data<AttendanceService>,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    service.list_attendance(query.into_inner()).await
}

pub async fn create_attendance(
    service: web::Data<AttendanceService>,
    req: HttpRequest,
    payload: web::Json<AttendancePayload>,
) -> ActixResult<HttpResponse> {
    service
        .create_attendance(&req, payload.into_inner())
        .await
}

pub async fn attendance_summary(
    service: web::Data<AttendanceService>,
) -> ActixResult<HttpResponse> {
    service.get_summary().await
}

pub async fn get_attendance(
    service: web::Data<AttendanceService>,
    record_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    service.get_attendance(record_id.0).await
}

pub async fn update_attendance(
    service: web::Data<AttendanceService>,
    record_id: SafeIDI64,
    payload: web::Json<AttendancePayload>,
) -> ActixResult<HttpResponse> {
    service
        .update_attendance(record_id.0, payload.into_inner(), false)
        .await
}

pub async fn partial_update_attendance(
    service: web::Data<AttendanceService>,
    record_id: SafeIDI64,
    payload: web::Json<AttendancePayload>,
) -> ActixResult<HttpResponse> {
    service
        .update_attendance(record_id.0, payload.into_inner(), true)
        .await
}

pub async fn delete_attendance(
    service: web::Data<AttendanceService>,
    record_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    service.delete_attendance(record_id.0).await
}

// summary 必须注册在 /{id} 之前
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/attendance")
            .wrap(TeacherOrReadOnly)
            .wrap(RequireJWT)
            .route("", web::get().to(list_attendance))
            .route("", web::post().to(create_attendance))
            .route("/summary", web::get().to(attendance_summary))
            .route("/{id}", web::get().to(get_attendance))
            .route("/{id}", web::put().to(update_attendance))
            .route("/{id}", web::patch().to(partial_update_attendance))
            .route("/{id}", web::delete().to(delete_attendance)),
    );
}
