use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::lessons::requests::{
    CheckLessonRequest, CreateLessonRequest, LessonListQuery, UpdateLessonRequest,
};
use crate::services::LessonService;
use crate::utils::SafeLessonId;

// 懒加载的全局 LESSON_SERVICE 实例
static LESSON_SERVICE: Lazy<LessonService> = Lazy::new(LessonService::new_lazy);

// HTTP处理程序
pub async fn list_lessons(
    req: HttpRequest,
    query: web::Query<LessonListQuery>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.list_lessons(&req, query.into_inner()).await
}

pub async fn create_lesson(
    req: HttpRequest,
    lesson_data: web::Json<CreateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .create_lesson(&req, lesson_data.into_inner())
        .await
}

pub async fn check_lesson(
    req: HttpRequest,
    check_data: web::Json<CheckLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .check_lesson(&req, check_data.into_inner())
        .await
}

pub async fn get_lesson(req: HttpRequest, lesson_id: SafeLessonId) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.get_lesson(&req, lesson_id.0).await
}

pub async fn update_lesson(
    req: HttpRequest,
    lesson_id: SafeLessonId,
    update_data: web::Json<UpdateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .update_lesson(&req, lesson_id.0, update_data.into_inner())
        .await
}

pub async fn delete_lesson(req: HttpRequest, lesson_id: SafeLessonId) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.delete_lesson(&req, lesson_id.0).await
}

// 配置路由
pub fn configure_lessons_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/lessons")
            .service(
                web::resource("")
                    .route(web::get().to(list_lessons))
                    .route(web::post().to(create_lesson)),
            )
            // 预检必须在 /{lesson_id} 之前注册
            .service(web::resource("/check").route(web::post().to(check_lesson)))
            .service(
                web::resource("/{lesson_id}")
                    .route(web::get().to(get_lesson))
                    .route(web::put().to(update_lesson))
                    .route(web::delete().to(delete_lesson)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lessons::entities::{Lesson, LessonType, WeekType};
    use crate::storage::{Storage, mock::MockStorage};
    use crate::utils::json_error_handler;
    use actix_web::{App, http::StatusCode, test};
    use serde_json::json;
    use std::sync::Arc;

    fn stored_lesson(id: &str, group: &str, teacher: Option<&str>, room: &str) -> Lesson {
        Lesson {
            id: id.into(),
            group_id: group.into(),
            semester_id: "S1".into(),
            subject_id: "MATH".into(),
            teacher_id: teacher.map(Into::into),
            room: room.into(),
            lesson_type: LessonType::Lecture,
            day_of_week: 2,
            start_time: "09:00".into(),
            end_time: "10:30".into(),
            week_type: WeekType::All,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn lesson_body(group: &str, teacher: &str, room: &str) -> serde_json::Value {
        json!({
            "group_id": group, "semester_id": "S1", "subject_id": "PHYS",
            "teacher_id": teacher, "room": room, "type": "seminar",
            "day_of_week": 2, "start_time": "10:00", "end_time": "11:00"
        })
    }

    macro_rules! init_app {
        ($mock:expr) => {{
            let storage: Arc<dyn Storage> = Arc::new($mock.clone());
            test::init_service(
                App::new()
                    .app_data(web::Data::new(storage))
                    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                    .configure(configure_lessons_routes),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn test_create_lesson_without_conflict() {
        let mock = MockStorage::new().with_lessons(vec![stored_lesson("L1", "G1", Some("T1"), "101")]);
        let app = init_app!(mock);

        let req = test::TestRequest::post()
            .uri("/api/v1/lessons")
            .set_json(lesson_body("G2", "T2", "102"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 0);
        assert_eq!(body["data"]["type"], "seminar");
        assert_eq!(body["data"]["week_type"], "all");
        assert_eq!(mock.lesson_count(), 2);
    }

    #[actix_web::test]
    async fn test_create_lesson_conflict_returns_all_violations() {
        let mock = MockStorage::new().with_lessons(vec![stored_lesson("L1", "G1", Some("T1"), "101")]);
        let app = init_app!(mock);

        let req = test::TestRequest::post()
            .uri("/api/v1/lessons")
            .set_json(lesson_body("G1", "T1", " 101 "))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 3002);
        let violations = body["data"]["violations"].as_array().unwrap();
        let dimensions: Vec<&str> = violations
            .iter()
            .map(|v| v["dimension"].as_str().unwrap())
            .collect();
        assert_eq!(dimensions, vec!["group", "teacher", "room"]);
        assert!(violations.iter().all(|v| v["lesson_id"] == "L1"));
        assert_eq!(mock.lesson_count(), 1);
    }

    #[actix_web::test]
    async fn test_no_teacher_sentinel_never_conflicts() {
        let mock = MockStorage::new().with_lessons(vec![stored_lesson("L1", "G1", None, "")]);
        let app = init_app!(mock);

        let req = test::TestRequest::post()
            .uri("/api/v1/lessons")
            .set_json(lesson_body("G2", "no_teacher", ""))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["data"]["teacher_id"].is_null());
    }

    #[actix_web::test]
    async fn test_check_lesson_is_dry_run() {
        let mock = MockStorage::new().with_lessons(vec![stored_lesson("L1", "G1", Some("T1"), "101")]);
        let app = init_app!(mock);

        let req = test::TestRequest::post()
            .uri("/api/v1/lessons/check")
            .set_json(lesson_body("G3", "T1", "303"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["can_add"], false);
        assert_eq!(body["data"]["violations"][0]["dimension"], "teacher");
        assert_eq!(mock.lesson_count(), 1);

        // 带上自身 ID 时不与自己冲突
        let mut edit = lesson_body("G1", "T1", "101");
        edit["id"] = json!("L1");
        let req = test::TestRequest::post()
            .uri("/api/v1/lessons/check")
            .set_json(edit)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["can_add"], true);
    }

    #[actix_web::test]
    async fn test_update_lesson_excludes_itself() {
        let mock = MockStorage::new().with_lessons(vec![
            stored_lesson("L1", "G1", Some("T1"), "101"),
            {
                let mut other = stored_lesson("L2", "G2", Some("T2"), "202");
                other.start_time = "12:00".into();
                other.end_time = "13:00".into();
                other
            },
        ]);
        let app = init_app!(mock);

        // 只平移自己的时间段，不应与自身冲突
        let req = test::TestRequest::put()
            .uri("/api/v1/lessons/L1")
            .set_json(json!({"start_time": "09:30", "end_time": "11:00"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["start_time"], "09:30");

        // 挪进 L2 的教室和时间段则冲突
        let req = test::TestRequest::put()
            .uri("/api/v1/lessons/L1")
            .set_json(json!({"room": "202", "start_time": "12:30", "end_time": "13:30"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::put()
            .uri("/api/v1/lessons/missing")
            .set_json(json!({"room": "303"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_malformed_lesson_is_rejected_before_validation() {
        let mock = MockStorage::new();
        let app = init_app!(mock);

        let mut body = lesson_body("G1", "T1", "101");
        body["start_time"] = json!("9:00");
        let req = test::TestRequest::post()
            .uri("/api/v1/lessons")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 3001);

        let mut body = lesson_body("G1", "T1", "101");
        body["end_time"] = json!("10:00");
        let req = test::TestRequest::post()
            .uri("/api/v1/lessons")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // 未知的课程类型由 JSON 错误处理器拦截
        let mut body = lesson_body("G1", "T1", "101");
        body["type"] = json!("webinar");
        let req = test::TestRequest::post()
            .uri("/api/v1/lessons")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(mock.lesson_count(), 0);
    }

    #[actix_web::test]
    async fn test_get_list_and_delete_lesson() {
        let mock = MockStorage::new().with_lessons(vec![
            stored_lesson("L1", "G1", Some("T1"), "101"),
            stored_lesson("L2", "G2", Some("T2"), "202"),
        ]);
        let app = init_app!(mock);

        let req = test::TestRequest::get().uri("/api/v1/lessons/L2").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/v1/lessons?teacher_id=T1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["id"], "L1");

        let req = test::TestRequest::get().uri("/api/v1/lessons").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::delete()
            .uri("/api/v1/lessons/L1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::delete()
            .uri("/api/v1/lessons/L1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(mock.lesson_count(), 1);
    }
}
