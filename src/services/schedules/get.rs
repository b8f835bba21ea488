use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::models::lessons::requests::LessonListQuery;
use crate::models::schedules::responses::ScheduleDetailResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let schedule = match storage.get_schedule_by_id(&schedule_id).await {
        Ok(Some(schedule)) => schedule,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ScheduleNotFound,
                "Schedule not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get schedule: {e}"),
                )),
            );
        }
    };

    // 课表的课程即该班组在该学期的全部课程
    let query = LessonListQuery {
        group_id: Some(schedule.group_id.clone()),
        semester_id: Some(schedule.semester_id.clone()),
        ..Default::default()
    };

    match storage.list_lessons(query).await {
        Ok(lessons) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ScheduleDetailResponse { schedule, lessons },
            "Schedule retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get schedule lessons: {e}"),
            )),
        ),
    }
}
