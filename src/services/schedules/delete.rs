use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ScheduleService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_schedule(&schedule_id).await {
        Ok(true) => {
            info!("Schedule {} deleted together with its lessons", schedule_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Schedule deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ScheduleNotFound,
            "Schedule not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::ScheduleDeleteFailed,
                format!("Schedule deletion failed: {e}"),
            )),
        ),
    }
}
