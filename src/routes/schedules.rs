use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::schedules::requests::{CreateScheduleRequest, ScheduleQueryParams};
use crate::services::ScheduleService;
use crate::utils::SafeScheduleId;

// 懒加载的全局 SCHEDULE_SERVICE 实例
static SCHEDULE_SERVICE: Lazy<ScheduleService> = Lazy::new(ScheduleService::new_lazy);

// HTTP处理程序
pub async fn list_schedules(
    req: HttpRequest,
    query: web::Query<ScheduleQueryParams>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .list_schedules(&req, query.into_inner())
        .await
}

pub async fn create_schedule(
    req: HttpRequest,
    schedule_data: web::Json<CreateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .create_schedule(&req, schedule_data.into_inner())
        .await
}

pub async fn get_schedule(
    req: HttpRequest,
    schedule_id: SafeScheduleId,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.get_schedule(&req, schedule_id.0).await
}

pub async fn delete_schedule(
    req: HttpRequest,
    schedule_id: SafeScheduleId,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.delete_schedule(&req, schedule_id.0).await
}

// 配置路由
pub fn configure_schedules_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/schedules")
            .service(
                web::resource("")
                    .route(web::get().to(list_schedules))
                    .route(web::post().to(create_schedule)),
            )
            .service(
                web::resource("/{schedule_id}")
                    .route(web::get().to(get_schedule))
                    .route(web::delete().to(delete_schedule)),
            ),
    );
}
