use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::LessonService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_lesson(
    service: &LessonService,
    request: &HttpRequest,
    lesson_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 删除课程不需要冲突检查
    match storage.delete_lesson(&lesson_id).await {
        Ok(true) => {
            info!("Lesson {} deleted", lesson_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Lesson deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::LessonNotFound,
            "Lesson not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::LessonDeleteFailed,
                format!("Lesson deletion failed: {e}"),
            )),
        ),
    }
}
