use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::models::schedules::requests::{ScheduleListQuery, ScheduleQueryParams};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_schedules(
    service: &ScheduleService,
    request: &HttpRequest,
    query: ScheduleQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = ScheduleListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        group_id: query.group_id,
        semester_id: query.semester_id,
    };

    match storage.list_schedules_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Schedule list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve schedule list: {e}"),
            )),
        ),
    }
}
