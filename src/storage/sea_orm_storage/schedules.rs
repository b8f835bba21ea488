//! 课表存储操作

use super::SeaOrmStorage;
use crate::entity::lessons::{Column as LessonColumn, Entity as Lessons};
use crate::entity::schedules::{ActiveModel, Column, Entity as Schedules, Model};
use crate::errors::{Result, TimetableError};
use crate::models::{
    PaginationInfo,
    schedules::{
        entities::Schedule,
        requests::{CreateScheduleRequest, ScheduleListQuery},
        responses::ScheduleListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 查找课表，不存在则创建空课表
///
/// 在写入课程的事务内调用，保证课程总有所属课表。
pub(super) async fn ensure_schedule<C: ConnectionTrait>(
    conn: &C,
    group_id: &str,
    semester_id: &str,
) -> Result<Model> {
    let existing = Schedules::find()
        .filter(Column::GroupId.eq(group_id))
        .filter(Column::SemesterId.eq(semester_id))
        .one(conn)
        .await
        .map_err(|e| TimetableError::from_db("Failed to query schedule", e))?;

    if let Some(schedule) = existing {
        return Ok(schedule);
    }

    let now = chrono::Utc::now().timestamp();
    let model = ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        group_id: Set(group_id.to_string()),
        semester_id: Set(semester_id.to_string()),
        semester_label: Set(None),
        year_label: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    model
        .insert(conn)
        .await
        .map_err(|e| TimetableError::from_db("Failed to create schedule", e))
}

/// 课程变动后刷新课表的更新时间
pub(super) async fn touch_schedule<C: ConnectionTrait>(conn: &C, schedule: Model) -> Result<()> {
    let mut model: ActiveModel = schedule.into();
    model.updated_at = Set(chrono::Utc::now().timestamp());
    model
        .update(conn)
        .await
        .map_err(|e| TimetableError::from_db("Failed to update schedule", e))?;
    Ok(())
}

impl SeaOrmStorage {
    /// 创建课表
    pub async fn create_schedule_impl(&self, req: CreateScheduleRequest) -> Result<Schedule> {
        if self
            .get_schedule_by_group_and_semester_impl(&req.group_id, &req.semester_id)
            .await?
            .is_some()
        {
            return Err(TimetableError::conflict(format!(
                "Schedule for group {} in semester {} already exists",
                req.group_id, req.semester_id
            )));
        }

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            group_id: Set(req.group_id),
            semester_id: Set(req.semester_id),
            semester_label: Set(req.semester_label),
            year_label: Set(req.year_label),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            TimetableError::database_operation(format!("Failed to create schedule: {e}"))
        })?;

        Ok(result.into_schedule())
    }

    /// 通过 ID 获取课表
    pub async fn get_schedule_by_id_impl(&self, id: &str) -> Result<Option<Schedule>> {
        let result = Schedules::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| {
                TimetableError::database_operation(format!("Failed to query schedule: {e}"))
            })?;

        Ok(result.map(|m| m.into_schedule()))
    }

    /// 通过班组和学期获取课表
    pub async fn get_schedule_by_group_and_semester_impl(
        &self,
        group_id: &str,
        semester_id: &str,
    ) -> Result<Option<Schedule>> {
        let result = Schedules::find()
            .filter(Column::GroupId.eq(group_id))
            .filter(Column::SemesterId.eq(semester_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                TimetableError::database_operation(format!("Failed to query schedule: {e}"))
            })?;

        Ok(result.map(|m| m.into_schedule()))
    }

    /// 分页列出课表
    pub async fn list_schedules_with_pagination_impl(
        &self,
        query: ScheduleListQuery,
    ) -> Result<ScheduleListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(20).clamp(1, 100) as u64;

        let mut select = Schedules::find();

        if let Some(ref group_id) = query.group_id
            && !group_id.trim().is_empty()
        {
            select = select.filter(Column::GroupId.eq(group_id.trim()));
        }

        if let Some(ref semester_id) = query.semester_id
            && !semester_id.trim().is_empty()
        {
            select = select.filter(Column::SemesterId.eq(semester_id.trim()));
        }

        // 排序
        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_asc(Column::GroupId);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            TimetableError::database_operation(format!("Failed to count schedules: {e}"))
        })?;

        let pages = paginator.num_pages().await.map_err(|e| {
            TimetableError::database_operation(format!("Failed to count schedule pages: {e}"))
        })?;

        let schedules = paginator.fetch_page(page - 1).await.map_err(|e| {
            TimetableError::database_operation(format!("Failed to list schedules: {e}"))
        })?;

        Ok(ScheduleListResponse {
            items: schedules.into_iter().map(|m| m.into_schedule()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 删除课表及其课程
    pub async fn delete_schedule_impl(&self, id: &str) -> Result<bool> {
        let txn = self.db.begin().await.map_err(|e| {
            TimetableError::database_operation(format!("Failed to begin transaction: {e}"))
        })?;

        let Some(schedule) = Schedules::find_by_id(id.to_string())
            .one(&txn)
            .await
            .map_err(|e| {
                TimetableError::database_operation(format!("Failed to query schedule: {e}"))
            })?
        else {
            return Ok(false);
        };

        Lessons::delete_many()
            .filter(LessonColumn::GroupId.eq(schedule.group_id.as_str()))
            .filter(LessonColumn::SemesterId.eq(schedule.semester_id.as_str()))
            .exec(&txn)
            .await
            .map_err(|e| {
                TimetableError::database_operation(format!("Failed to delete lessons: {e}"))
            })?;

        let result = Schedules::delete_by_id(id.to_string())
            .exec(&txn)
            .await
            .map_err(|e| {
                TimetableError::database_operation(format!("Failed to delete schedule: {e}"))
            })?;

        txn.commit().await.map_err(|e| {
            TimetableError::database_operation(format!("Failed to commit transaction: {e}"))
        })?;

        Ok(result.rows_affected > 0)
    }
}
