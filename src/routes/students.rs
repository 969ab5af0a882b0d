use actix_web::{HttpResponse, Result as ActixResult, web};

use crate::middlewares::{RequireJWT, TeacherOrReadOnly};
use crate::models::ListParams;
use crate::models::students::requests::StudentPayload;
use crate::services::StudentService;
use crate::utils::SafeIDI64;

pub async fn list_students(
    service: web::Data<StudentService>,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    service.list_students(query.into_inner()).await
}

pub async fn create_student(
    service: web::Data<StudentService>,
    payload: web::Json<StudentPayload>,
) -> ActixResult<HttpResponse> {
    service.create_student(payload.into_inner()).await
}

pub async fn get_student(
    service: web::Data<StudentService>,
    student_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    service.get_student(student_id.0).await
}

pub async fn update_student(
    service: web::Data<StudentService>,
    student_id: SafeIDI64,
    payload: web::Json<StudentPayload>,
) -> ActixResult<HttpResponse> {
    service
        .update_student(student_id.0, payload.into_inner(), false)
        .await
}

pub async fn partial_update_student(
    service: web::Data<StudentService>,
    student_id: SafeIDI64,
    payload: web::Json<StudentPayload>,
) -> ActixResult<HttpResponse> {
    service
        .update_student(student_id.0, payload.into_inner(), true)
        .await
}

pub async fn delete_student(
    service: web::Data<StudentService>,
    student_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    service.delete_student(student_id.0).await
}

pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/students")
            .wrap(TeacherOrReadOnly)
            .wrap(RequireJWT)
            .route("", web::get().to(list_students))
            .route("", web::post().to(create_student))
            .route("/{id}", web::get().to(get_student))
            .route("/{id}", web::put().to(update_student))
            .route("/{id}", web::patch().to(partial_update_student))
            .route("/{id}", web::delete().to(delete_student)),
    );
}
