use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};

use super::{LessonService, check_lesson_shape, commit_response};
use crate::models::lessons::requests::CreateLessonRequest;
use crate::storage::CommitMode;

pub async fn create_lesson(
    service: &LessonService,
    request: &HttpRequest,
    lesson_data: CreateLessonRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let lesson = lesson_data.into_lesson(uuid::Uuid::new_v4().to_string(), chrono::Utc::now());

    if let Err(resp) = check_lesson_shape(&lesson) {
        return Ok(resp);
    }

    // 存储层在同一事务内重新取范围并校验冲突
    let outcome = storage.commit_lesson(lesson, CommitMode::Create).await;
    Ok(commit_response(
        outcome,
        StatusCode::CREATED,
        "Lesson created successfully",
    ))
}
