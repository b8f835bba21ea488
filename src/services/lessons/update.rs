use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};

use super::{LessonService, check_lesson_shape, commit_response};
use crate::models::lessons::requests::UpdateLessonRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::CommitMode;

pub async fn update_lesson(
    service: &LessonService,
    request: &HttpRequest,
    lesson_id: String,
    update_data: UpdateLessonRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 查询课程信息
    let existing = match storage.get_lesson_by_id(&lesson_id).await {
        Ok(Some(lesson)) => lesson,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::LessonNotFound,
                "Lesson not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get lesson information: {e}"),
                )),
            );
        }
    };

    // 合并后的候选课程 ID 不变，冲突检查会排除它自己
    let candidate = update_data.apply_to(&existing);

    if let Err(resp) = check_lesson_shape(&candidate) {
        return Ok(resp);
    }

    // 读取与写入之间课程可能被删除，存储层会返回 NotFound
    let outcome = storage.commit_lesson(candidate, CommitMode::Update).await;
    Ok(commit_response(
        outcome,
        StatusCode::OK,
        "Lesson updated successfully",
    ))
}
