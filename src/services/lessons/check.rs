use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{LessonService, check_lesson_shape};
use crate::models::lessons::requests::{CheckLessonRequest, LessonScope};
use crate::models::lessons::responses::LessonCheckResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::scheduling::can_add_lesson;

pub async fn check_lesson(
    service: &LessonService,
    request: &HttpRequest,
    check_data: CheckLessonRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 编辑场景下沿用原课程 ID，才能把它自身排除在外
    let id = check_data
        .id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let candidate = check_data.lesson.into_lesson(id, chrono::Utc::now());

    if let Err(resp) = check_lesson_shape(&candidate) {
        return Ok(resp);
    }

    let scope = LessonScope::for_candidate(&candidate);
    let existing = match storage.fetch_lessons_for_scope(&scope).await {
        Ok(lessons) => lessons,
        Err(e) => {
            error!("Failed to fetch lessons for conflict check: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to fetch lessons for conflict check: {e}"),
                )),
            );
        }
    };

    let violations = can_add_lesson(&candidate, &existing);
    let message = if violations.is_empty() {
        "No conflicts found".to_string()
    } else {
        format!("Found {} conflict(s)", violations.len())
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        LessonCheckResponse::from_violations(violations),
        message,
    )))
}
