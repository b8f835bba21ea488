use std::sync::Arc;

use crate::models::{
    lessons::{
        entities::{Lesson, Violation},
        requests::{LessonListQuery, LessonScope},
    },
    schedules::{
        entities::Schedule,
        requests::{CreateScheduleRequest, ScheduleListQuery},
        responses::ScheduleListResponse,
    },
};

use crate::errors::Result;

#[cfg(test)]
pub mod mock;
pub mod sea_orm_storage;

/// 课程写入方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    /// 新增：同 ID 的课程已存在时返回 Conflict 错误
    Create,
    /// 更新：课程已被删除时返回 NotFound 错误，不会重新创建
    Update,
}

/// 课程写入结果
#[derive(Debug, Clone)]
pub enum CommitOutcome {
    /// 已写入（新增或更新）
    Committed(Lesson),
    /// 与范围内已有课程冲突，未写入
    Rejected(Vec<Violation>),
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 课表管理方法
    // 创建空课表，同一 group + semester 已存在时返回 Conflict 错误
    async fn create_schedule(&self, schedule: CreateScheduleRequest) -> Result<Schedule>;
    // 通过ID获取课表
    async fn get_schedule_by_id(&self, id: &str) -> Result<Option<Schedule>>;
    // 通过班组和学期获取课表
    async fn get_schedule_by_group_and_semester(
        &self,
        group_id: &str,
        semester_id: &str,
    ) -> Result<Option<Schedule>>;
    // 列出课表
    async fn list_schedules_with_pagination(
        &self,
        query: ScheduleListQuery,
    ) -> Result<ScheduleListResponse>;
    // 删除课表及其全部课程
    async fn delete_schedule(&self, id: &str) -> Result<bool>;

    /// 课程管理方法
    // 取冲突检查范围内的课程
    async fn fetch_lessons_for_scope(&self, scope: &LessonScope) -> Result<Vec<Lesson>>;
    // 通过ID获取课程
    async fn get_lesson_by_id(&self, id: &str) -> Result<Option<Lesson>>;
    // 按条件列出课程，按星期、开始时间排序
    async fn list_lessons(&self, query: LessonListQuery) -> Result<Vec<Lesson>>;
    // 写入课程：在同一事务内重新做冲突检查，无冲突才新增或更新
    // 课表不存在时自动创建
    async fn commit_lesson(&self, lesson: Lesson, mode: CommitMode) -> Result<CommitOutcome>;
    // 删除课程（不需要冲突检查）
    async fn delete_lesson(&self, id: &str) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
