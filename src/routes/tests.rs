use actix_web::http::{StatusCode, header};
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{App, test};
use serde_json::{Value, json};
use std::sync::Arc;

use super::configure_api;
use crate::cache::{MokaCacheWrapper, ObjectCache};
use crate::models::users::entities::User;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::{SeaOrmStorage, Storage};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::hash_password;

const PASSWORD: &str = "Chalkboard42";

struct TestContext {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
    teacher: User,
    viewer: User,
}

impl TestContext {
    async fn new() -> Self {
        let storage: Arc<dyn Storage> = Arc::new(
            SeaOrmStorage::connect("sqlite::memory:", 1, 30)
                .await
                .unwrap(),
        );
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(100, 60));
        let teacher = create_user(&storage, "teacher_li", true).await;
        let viewer = create_user(&storage, "viewer_wu", false).await;
        Self {
            storage,
            cache,
            teacher,
            viewer,
        }
    }

    fn bearer(user: &User) -> (header::HeaderName, String) {
        let token = JwtUtils::generate_access_token(user.id).unwrap();
        (header::AUTHORIZATION, format!("Bearer {token}"))
    }

    fn teacher_auth(&self) -> (header::HeaderName, String) {
        Self::bearer(&self.teacher)
    }

    fn viewer_auth(&self) -> (header::HeaderName, String) {
        Self::bearer(&self.viewer)
    }
}

async fn create_user(storage: &Arc<dyn Storage>, username: &str, is_staff: bool) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@school.test"),
            password: hash_password(PASSWORD).unwrap(),
            is_staff,
            first_name: None,
            last_name: None,
        })
        .await
        .unwrap()
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .wrap(NormalizePath::new(TrailingSlash::Trim))
                .configure(configure_api($ctx.storage.clone(), $ctx.cache.clone())),
        )
        .await
    };
}

async fn read_json<B>(res: actix_web::dev::ServiceResponse<B>) -> Value
where
    B: actix_web::body::MessageBody,
{
    let body = test::read_body(res).await;
    serde_json::from_slice(&body).unwrap()
}

fn student_body(name: &str, class_name: &str, admission_number: &str) -> Value {
    json!({
        "name": name,
        "class_name": class_name,
        "admission_number": admission_number,
        "enrollment_date": "2024-09-01",
    })
}

#[actix_web::test]
async fn test_unauthenticated_requests_are_rejected() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    for uri in [
        "/api/students/",
        "/api/attendance/",
        "/api/attendance/summary/",
        "/api/performance/summary/",
        "/api/users/",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }

    let req = test::TestRequest::get()
        .uri("/api/students")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_non_staff_can_read_but_not_write() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/students/")
        .insert_header(ctx.viewer_auth())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/students/")
        .insert_header(ctx.viewer_auth())
        .set_json(student_body("Ann Lee", "7B", "A-001"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = read_json(res).await;
    assert_eq!(
        body["message"],
        "You do not have permission to perform this action."
    );

    // 拒绝写入时不应落库
    let count = ctx
        .storage
        .list_students_with_pagination(Default::default())
        .await
        .unwrap()
        .pagination
        .total;
    assert_eq!(count, 0);
}

#[actix_web::test]
async fn test_student_crud_lifecycle() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/students/")
        .insert_header(ctx.teacher_auth())
        .set_json(student_body("Ann Lee", "7B", "A-001"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = read_json(res).await;
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["enrollment_date"], "2024-09-01");

    let req = test::TestRequest::patch()
        .uri(&format!("/api/students/{id}/"))
        .insert_header(ctx.teacher_auth())
        .set_json(json!({ "class_name": "8A" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["data"]["class_name"], "8A");
    assert_eq!(body["data"]["name"], "Ann Lee");

    // PUT 需要完整字段
    let req = test::TestRequest::put()
        .uri(&format!("/api/students/{id}"))
        .insert_header(ctx.teacher_auth())
        .set_json(json!({ "name": "Ann Lee" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert_eq!(body["data"]["class_name"][0], "This field is required.");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/students/{id}/"))
        .insert_header(ctx.teacher_auth())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/students/{id}/"))
        .insert_header(ctx.viewer_auth())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_invalid_ids_are_not_found() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    for uri in ["/api/students/abc/", "/api/students/0", "/api/performance/999/"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(ctx.teacher_auth())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/students/")
        .insert_header(ctx.teacher_auth())
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_student_search_and_ordering() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    for (name, class_name, number) in [
        ("Ann Lee", "7B", "A-001"),
        ("Bob Stone", "7A", "A-002"),
        ("Cara Lee", "8C", "A-003"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/students/")
            .insert_header(ctx.teacher_auth())
            .set_json(student_body(name, class_name, number))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }

    let req = test::TestRequest::get()
        .uri("/api/students/?search=lee&ordering=-name")
        .insert_header(ctx.viewer_auth())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    let names: Vec<&str> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Cara Lee", "Ann Lee"]);
    assert_eq!(body["data"]["pagination"]["total"], 2);

    // 多个搜索词必须同时命中
    let req = test::TestRequest::get()
        .uri("/api/students/?search=lee%207B")
        .insert_header(ctx.viewer_auth())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["items"][0]["name"], "Ann Lee");

    let req = test::TestRequest::get()
        .uri("/api/students/?ordering=class_name&size=2&page=2")
        .insert_header(ctx.viewer_auth())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["items"][0]["class_name"], "8C");
    assert_eq!(body["data"]["pagination"]["total_pages"], 2);
}

async fn seed_student(ctx: &TestContext) -> i64 {
    seed_named_student(ctx, "Ann Lee", "A-001").await
}

async fn seed_named_student(ctx: &TestContext, name: &str, admission_number: &str) -> i64 {
    let student = ctx
        .storage
        .create_student(crate::models::students::requests::NewStudent {
            name: name.to_string(),
            class_name: "7B".to_string(),
            admission_number: admission_number.to_string(),
            enrollment_date: chrono::NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
        })
        .await
        .unwrap();
    student.id
}

fn item_ids(body: &Value) -> Vec<i64> {
    body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

#[actix_web::test]
async fn test_recorded_by_is_forced_to_caller() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let student_id = seed_student(&ctx).await;

    let req = test::TestRequest::post()
        .uri("/api/attendance/")
        .insert_header(ctx.teacher_auth())
        .set_json(json!({
            "student": student_id,
            "date": "2024-10-01",
            "status": "late",
            "recorded_by": ctx.viewer.id,
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = read_json(res).await;
    assert_eq!(body["data"]["recorded_by"]["id"], ctx.teacher.id);
    assert_eq!(body["data"]["recorded_by"]["username"], "teacher_li");

    let req = test::TestRequest::post()
        .uri("/api/performance/")
        .insert_header(ctx.teacher_auth())
        .set_json(json!({
            "student": student_id,
            "subject": "Math",
            "score": "88.5",
            "recorded_by": ctx.viewer.id,
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = read_json(res).await;
    assert_eq!(body["data"]["recorded_by"]["id"], ctx.teacher.id);
    assert_eq!(body["data"]["score"], 88.5);
    assert_eq!(
        body["data"]["date_recorded"],
        chrono::Utc::now().date_naive().to_string()
    );
}

#[actix_web::test]
async fn test_record_validation_errors() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let student_id = seed_student(&ctx).await;

    let req = test::TestRequest::post()
        .uri("/api/attendance/")
        .insert_header(ctx.teacher_auth())
        .set_json(json!({ "student": student_id, "date": "01/10/2024", "status": "excused" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert!(body["data"]["date"].is_array());
    assert_eq!(body["data"]["status"][0], "\"excused\" is not a valid choice.");

    let req = test::TestRequest::post()
        .uri("/api/performance/")
        .insert_header(ctx.teacher_auth())
        .set_json(json!({ "student": student_id + 100, "subject": "Math", "score": 70 }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert_eq!(
        body["data"]["student"][0],
        format!("Invalid pk \"{}\" - object does not exist.", student_id + 100)
    );
}

#[actix_web::test]
async fn test_attendance_summary() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/attendance/summary/")
        .insert_header(ctx.viewer_auth())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["total_records"], 0);
    assert_eq!(body["data"]["present_percent"], 0.0);

    let student_id = seed_student(&ctx).await;
    for (date, status) in [
        ("2024-10-01", "present"),
        ("2024-10-02", "present"),
        ("2024-10-03", "absent"),
        ("2024-10-04", "late"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/attendance/")
            .insert_header(ctx.teacher_auth())
            .set_json(json!({ "student": student_id, "date": date, "status": status }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }

    let req = test::TestRequest::get()
        .uri("/api/attendance/summary")
        .insert_header(ctx.viewer_auth())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(
        body["data"],
        json!({
            "total_records": 4,
            "present_count": 2,
            "absent_count": 1,
            "late_count": 1,
            "present_percent": 50.0,
            "absent_percent": 25.0,
            "late_percent": 25.0,
        })
    );
}

#[actix_web::test]
async fn test_performance_summary() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/performance/summary/")
        .insert_header(ctx.viewer_auth())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(
        body["data"],
        json!({ "overall_average": 0.0, "total_records": 0, "subject_breakdown": {} })
    );

    let student_id = seed_student(&ctx).await;
    for (subject, score) in [("Math", 80), ("Math", 90), ("Science", 70)] {
        let req = test::TestRequest::post()
            .uri("/api/performance/")
            .insert_header(ctx.teacher_auth())
            .set_json(json!({ "student": student_id, "subject": subject, "score": score }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }

    let req = test::TestRequest::get()
        .uri("/api/performance/summary/")
        .insert_header(ctx.viewer_auth())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(
        body["data"],
        json!({
            "overall_average": 80.0,
            "total_records": 3,
            "subject_breakdown": { "Math": 85.0, "Science": 70.0 },
        })
    );
}

#[actix_web::test]
async fn test_performance_summary_with_huge_score() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let student_id = seed_student(&ctx).await;

    let req = test::TestRequest::post()
        .uri("/api/performance/")
        .insert_header(ctx.teacher_auth())
        .set_json(json!({ "student": student_id, "subject": "Math", "score": 1e307 }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::get()
        .uri("/api/performance/summary/")
        .insert_header(ctx.viewer_auth())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["overall_average"], 1e307);
    assert_eq!(body["data"]["subject_breakdown"]["Math"], 1e307);
}

#[actix_web::test]
async fn test_search_ignores_case() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    seed_student(&ctx).await;

    for uri in [
        "/api/students/?search=LEE",
        "/api/students/?search=aNn",
        "/api/students/?search=7b",
    ] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(ctx.viewer_auth())
            .to_request();
        let body = read_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["pagination"]["total"], 1, "{uri}");
    }

    // 通配符按字面匹配
    let req = test::TestRequest::get()
        .uri("/api/students/?search=%25")
        .insert_header(ctx.viewer_auth())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["pagination"]["total"], 0);
}

#[actix_web::test]
async fn test_attendance_search_and_ordering() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let ann = seed_student(&ctx).await;
    let bob = seed_named_student(&ctx, "Bob Stone", "A-002").await;

    let mut ids = Vec::new();
    for (student, date, status) in [
        (ann, "2024-10-01", "present"),
        (ann, "2024-10-03", "late"),
        (bob, "2024-10-02", "absent"),
        (bob, "2024-10-04", "late"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/attendance/")
            .insert_header(ctx.teacher_auth())
            .set_json(json!({ "student": student, "date": date, "status": status }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        ids.push(read_json(res).await["data"]["id"].as_i64().unwrap());
    }

    // 按学生姓名
    let req = test::TestRequest::get()
        .uri("/api/attendance/?search=ann")
        .insert_header(ctx.viewer_auth())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(item_ids(&body), vec![ids[0], ids[1]]);
    assert!(body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .all(|item| item["student"] == ann));

    // 按状态
    let req = test::TestRequest::get()
        .uri("/api/attendance/?search=LATE")
        .insert_header(ctx.viewer_auth())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(item_ids(&body), vec![ids[1], ids[3]]);

    let req = test::TestRequest::get()
        .uri("/api/attendance/?search=bob%20late")
        .insert_header(ctx.viewer_auth())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(item_ids(&body), vec![ids[3]]);

    let req = test::TestRequest::get()
        .uri("/api/attendance/?ordering=-date")
        .insert_header(ctx.viewer_auth())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    let dates: Vec<&str> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["date"].as_str().unwrap())
        .collect();
    assert_eq!(
        dates,
        vec!["2024-10-04", "2024-10-03", "2024-10-02", "2024-10-01"]
    );
}

#[actix_web::test]
async fn test_performance_search_and_ordering() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let ann = seed_student(&ctx).await;
    let bob = seed_named_student(&ctx, "Bob Stone", "A-002").await;

    let mut ids = Vec::new();
    for (student, subject, score) in [
        (ann, "Math", 72),
        (ann, "Science", 95),
        (bob, "Math", 88),
        (bob, "History", 60),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/performance/")
            .insert_header(ctx.teacher_auth())
            .set_json(json!({ "student": student, "subject": subject, "score": score }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        ids.push(read_json(res).await["data"]["id"].as_i64().unwrap());
    }

    // 按学生姓名
    let req = test::TestRequest::get()
        .uri("/api/performance/?search=STONE")
        .insert_header(ctx.viewer_auth())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(item_ids(&body), vec![ids[2], ids[3]]);

    // 按科目
    let req = test::TestRequest::get()
        .uri("/api/performance/?search=math")
        .insert_header(ctx.viewer_auth())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(item_ids(&body), vec![ids[0], ids[2]]);

    let req = test::TestRequest::get()
        .uri("/api/performance/?search=ann%20math")
        .insert_header(ctx.viewer_auth())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(item_ids(&body), vec![ids[0]]);

    let req = test::TestRequest::get()
        .uri("/api/performance/?ordering=-score")
        .insert_header(ctx.viewer_auth())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    let scores: Vec<f64> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["score"].as_f64().unwrap())
        .collect();
    assert_eq!(scores, vec![95.0, 88.0, 72.0, 60.0]);
}

#[actix_web::test]
async fn test_deleting_student_cascades_records() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let student_id = seed_student(&ctx).await;

    let req = test::TestRequest::post()
        .uri("/api/attendance/")
        .insert_header(ctx.teacher_auth())
        .set_json(json!({ "student": student_id, "date": "2024-10-01", "status": "present" }))
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    let record_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/students/{student_id}"))
        .insert_header(ctx.teacher_auth())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/attendance/{record_id}/"))
        .insert_header(ctx.teacher_auth())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_login_refresh_and_me() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "viewer_wu", "password": "wrong-password" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "viewer_wu", "password": PASSWORD }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let refresh_cookie = res
        .response()
        .cookies()
        .find(|c| c.name() == "refresh_token")
        .unwrap()
        .into_owned();
    let body = read_json(res).await;
    let access_token = body["data"]["access_token"].as_str().unwrap().to_string();
    assert!(body["data"]["user"].get("password_hash").is_none());

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {access_token}")))
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["user"]["username"], "viewer_wu");
    assert_eq!(body["data"]["user"]["is_staff"], false);

    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .cookie(refresh_cookie)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert!(body["data"]["access_token"].is_string());
}

#[actix_web::test]
async fn test_user_management_requires_staff() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let new_user = json!({
        "username": "student_rep",
        "email": "rep@school.test",
        "password": "Notebook77",
    });

    let req = test::TestRequest::post()
        .uri("/api/users/")
        .insert_header(ctx.viewer_auth())
        .set_json(&new_user)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::post()
        .uri("/api/users/")
        .insert_header(ctx.teacher_auth())
        .set_json(&new_user)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/users/")
        .insert_header(ctx.teacher_auth())
        .set_json(&new_user)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CONFLICT
    );
}

#[actix_web::test]
async fn test_promoting_user_takes_effect_immediately() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    // 先发一次请求，让中间件缓存该用户
    let req = test::TestRequest::post()
        .uri("/api/students/")
        .insert_header(ctx.viewer_auth())
        .set_json(student_body("Ann Lee", "7B", "A-001"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::patch()
        .uri(&format!("/api/users/{}/", ctx.viewer.id))
        .insert_header(ctx.teacher_auth())
        .set_json(json!({ "is_staff": true }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/students/")
        .insert_header(ctx.viewer_auth())
        .set_json(student_body("Ann Lee", "7B", "A-001"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );
}
