pub mod check;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use std::sync::Arc;
use tracing::{error, warn};

use crate::config::AppConfig;
use crate::errors::TimetableError;
use crate::models::lessons::entities::Lesson;
use crate::models::lessons::requests::{
    CheckLessonRequest, CreateLessonRequest, LessonListQuery, UpdateLessonRequest,
};
use crate::models::lessons::responses::LessonConflictResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::{CommitOutcome, Storage};
use crate::utils::validate::validate_lesson;

pub struct LessonService {
    storage: Option<Arc<dyn Storage>>,
}

impl LessonService {
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

    // 按条件列出课程
    pub async fn list_lessons(
        &self,
        request: &HttpRequest,
        query: LessonListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_lessons(self, request, query).await
    }

    // 新增课程（先校验冲突）
    pub async fn create_lesson(
        &self,
        request: &HttpRequest,
        lesson_data: CreateLessonRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_lesson(self, request, lesson_data).await
    }

    // 冲突预检，不写入
    pub async fn check_lesson(
        &self,
        request: &HttpRequest,
        check_data: CheckLessonRequest,
    ) -> ActixResult<HttpResponse> {
        check::check_lesson(self, request, check_data).await
    }

    // 根据课程 ID 获取课程
    pub async fn get_lesson(
        &self,
        request: &HttpRequest,
        lesson_id: String,
    ) -> ActixResult<HttpResponse> {
        get::get_lesson(self, request, lesson_id).await
    }

    // 更新课程（排除自身后重新校验冲突）
    pub async fn update_lesson(
        &self,
        request: &HttpRequest,
        lesson_id: String,
        update_data: UpdateLessonRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_lesson(self, request, lesson_id, update_data).await
    }

    // 删除课程
    pub async fn delete_lesson(
        &self,
        request: &HttpRequest,
        lesson_id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_lesson(self, request, lesson_id).await
    }
}

/// 字段格式校验，失败时返回 400 响应
fn check_lesson_shape(lesson: &Lesson) -> Result<(), HttpResponse> {
    let max_day_of_week = AppConfig::get().schedule.max_day_of_week;
    let result = validate_lesson(lesson, max_day_of_week);
    if result.is_valid {
        Ok(())
    } else {
        Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::LessonValidationFailed,
            result.error_message(),
        )))
    }
}

/// 把写入结果转换为响应：冲突时返回 409 和完整冲突列表
fn commit_response(
    outcome: crate::errors::Result<CommitOutcome>,
    success_status: StatusCode,
    success_message: &str,
) -> HttpResponse {
    match outcome {
        Ok(CommitOutcome::Committed(lesson)) => HttpResponse::build(success_status)
            .json(ApiResponse::success(lesson, success_message)),
        Ok(CommitOutcome::Rejected(violations)) => {
            let message = format!(
                "Lesson conflicts with {} existing booking(s)",
                violations.len()
            );
            HttpResponse::Conflict().json(ApiResponse::error(
                ErrorCode::LessonConflict,
                LessonConflictResponse { violations },
                message,
            ))
        }
        Err(TimetableError::NotFound(msg)) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::LessonNotFound, msg))
        }
        Err(TimetableError::Conflict(msg)) => HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::LessonCommitFailed, msg)),
        Err(TimetableError::TransactionConflict(msg)) => {
            warn!("Lesson commit kept colliding with concurrent writers: {}", msg);
            HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::LessonCommitContended,
                "Lesson commit collided with concurrent changes, please retry",
            ))
        }
        Err(e) => {
            error!("Lesson commit failed: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::LessonCommitFailed,
                format!("Lesson commit failed: {e}"),
            ))
        }
    }
}
