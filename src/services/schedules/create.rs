use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::errors::TimetableError;
use crate::models::schedules::requests::CreateScheduleRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_identifier;

pub async fn create_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    mut schedule_data: CreateScheduleRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    schedule_data.group_id = schedule_data.group_id.trim().to_string();
    schedule_data.semester_id = schedule_data.semester_id.trim().to_string();

    if let Err(msg) = validate_identifier("group_id", &schedule_data.group_id)
        .and_then(|_| validate_identifier("semester_id", &schedule_data.semester_id))
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            msg,
        )));
    }

    match storage.create_schedule(schedule_data).await {
        Ok(schedule) => Ok(HttpResponse::Created().json(ApiResponse::success(
            schedule,
            "Schedule created successfully",
        ))),
        Err(TimetableError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::ScheduleAlreadyExists, msg),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::ScheduleCreationFailed,
                format!("Schedule creation failed: {e}"),
            )),
        ),
    }
}
