use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SystemService;
use crate::models::system::responses::HealthResponse;
use crate::models::{ApiResponse, AppStartTime};

/// 存活检查：返回版本、运行环境与运行时长
pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| {
            chrono::Utc::now()
                .signed_duration_since(start.start_datetime)
                .num_seconds()
        })
        .unwrap_or(0);

    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        uptime_seconds,
        max_day_of_week: config.schedule.max_day_of_week,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Service is healthy")))
}
