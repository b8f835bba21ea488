use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonService;
use crate::models::lessons::requests::LessonListQuery;
use crate::models::lessons::responses::LessonListResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_lessons(
    service: &LessonService,
    request: &HttpRequest,
    query: LessonListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 不带任何条件会扫出全部课程，要求至少一个过滤条件
    if query.group_id.is_none()
        && query.semester_id.is_none()
        && query.teacher_id.is_none()
        && query.room.is_none()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "At least one of group_id, semester_id, teacher_id or room is required",
        )));
    }

    match storage.list_lessons(query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            LessonListResponse {
                total: items.len() as i64,
                items,
            },
            "Lesson list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve lesson list: {e}"),
            )),
        ),
    }
}
