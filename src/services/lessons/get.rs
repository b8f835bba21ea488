use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_lesson(
    service: &LessonService,
    request: &HttpRequest,
    lesson_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_lesson_by_id(&lesson_id).await {
        Ok(Some(lesson)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            lesson,
            "Lesson retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::LessonNotFound,
            "Lesson not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get lesson: {e}"),
            )),
        ),
    }
}
