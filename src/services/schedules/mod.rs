pub mod create;
pub mod delete;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::schedules::requests::{CreateScheduleRequest, ScheduleQueryParams};
use crate::storage::Storage;

pub struct ScheduleService {
    storage: Option<Arc<dyn Storage>>,
}

impl ScheduleService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 分页列出课表
    pub async fn list_schedules(
        &self,
        request: &HttpRequest,
        query: ScheduleQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_schedules(self, request, query).await
    }

    // 创建空课表
    pub async fn create_schedule(
        &self,
        request: &HttpRequest,
        schedule_data: CreateScheduleRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_schedule(self, request, schedule_data).await
    }

    // 课表详情（含课程）
    pub async fn get_schedule(
        &self,
        request: &HttpRequest,
        schedule_id: String,
    ) -> ActixResult<HttpResponse> {
        get::get_schedule(self, request, schedule_id).await
    }

    // 删除课表及其课程
    pub async fn delete_schedule(
        &self,
        request: &HttpRequest,
        schedule_id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_schedule(self, request, schedule_id).await
    }
}
