//! 课程存储操作

use super::SeaOrmStorage;
use super::schedules::{ensure_schedule, touch_schedule};
use crate::entity::lessons::{ActiveModel, Column, Entity as Lessons};
use crate::entity::schedules::{Column as ScheduleColumn, Entity as Schedules};
use crate::errors::{Result, TimetableError};
use crate::models::lessons::{
    entities::Lesson,
    requests::{LessonListQuery, LessonScope},
};
use crate::scheduling::can_add_lesson;
use crate::storage::{CommitMode, CommitOutcome};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseTransaction, DbBackend,
    EntityTrait, IsolationLevel, QueryFilter, QueryOrder, Select, Set, TransactionTrait,
};
use tracing::{info, warn};

/// 并发事务冲突时写入课程的最多尝试次数
const MAX_COMMIT_ATTEMPTS: u32 = 3;

// 冲突检查范围对应的查询：同学期内 同班组 OR 同教师 OR 同教室
fn scope_select(scope: &LessonScope) -> Select<Lessons> {
    let mut resources = Condition::any().add(Column::GroupId.eq(scope.group_id.as_str()));
    if let Some(teacher_id) = &scope.teacher_id {
        resources = resources.add(Column::TeacherId.eq(teacher_id.as_str()));
    }
    if let Some(room) = &scope.room {
        resources = resources.add(Column::Room.eq(room.as_str()));
    }

    let mut condition = Condition::all()
        .add(Column::SemesterId.eq(scope.semester_id.as_str()))
        .add(resources);
    if let Some(day_of_week) = scope.day_of_week {
        condition = condition.add(Column::DayOfWeek.eq(i32::from(day_of_week)));
    }

    Lessons::find()
        .filter(condition)
        .order_by_asc(Column::DayOfWeek)
        .order_by_asc(Column::StartTime)
}

async fn fetch_scope<C: ConnectionTrait>(conn: &C, scope: &LessonScope) -> Result<Vec<Lesson>> {
    let models = scope_select(scope)
        .all(conn)
        .await
        .map_err(|e| TimetableError::from_db("Failed to query lessons in scope", e))?;
    Ok(models.into_iter().map(|m| m.into_lesson()).collect())
}

fn into_active_model(lesson: &Lesson) -> ActiveModel {
    ActiveModel {
        id: Set(lesson.id.clone()),
        group_id: Set(lesson.group_id.clone()),
        semester_id: Set(lesson.semester_id.clone()),
        subject_id: Set(lesson.subject_id.clone()),
        teacher_id: Set(lesson.teacher_id.clone()),
        room: Set(lesson.room.trim().to_string()),
        lesson_type: Set(lesson.lesson_type.to_string()),
        day_of_week: Set(i32::from(lesson.day_of_week)),
        start_time: Set(lesson.start_time.clone()),
        end_time: Set(lesson.end_time.clone()),
        week_type: Set(lesson.week_type.to_string()),
        created_at: Set(lesson.created_at.timestamp()),
        updated_at: Set(lesson.updated_at.timestamp()),
    }
}

impl SeaOrmStorage {
    /// 取冲突检查范围内的课程
    pub async fn fetch_lessons_for_scope_impl(&self, scope: &LessonScope) -> Result<Vec<Lesson>> {
        fetch_scope(&self.db, scope).await
    }

    /// 通过 ID 获取课程
    pub async fn get_lesson_by_id_impl(&self, id: &str) -> Result<Option<Lesson>> {
        let result = Lessons::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| {
                TimetableError::database_operation(format!("Failed to query lesson: {e}"))
            })?;

        Ok(result.map(|m| m.into_lesson()))
    }

    /// 按条件列出课程
    pub async fn list_lessons_impl(&self, query: LessonListQuery) -> Result<Vec<Lesson>> {
        let mut select = Lessons::find();

        if let Some(ref group_id) = query.group_id {
            select = select.filter(Column::GroupId.eq(group_id.as_str()));
        }
        if let Some(ref semester_id) = query.semester_id {
            select = select.filter(Column::SemesterId.eq(semester_id.as_str()));
        }
        if let Some(ref teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id.as_str()));
        }
        if let Some(ref room) = query.room {
            select = select.filter(Column::Room.eq(room.trim()));
        }
        if let Some(day_of_week) = query.day_of_week {
            select = select.filter(Column::DayOfWeek.eq(i32::from(day_of_week)));
        }

        let models = select
            .order_by_asc(Column::DayOfWeek)
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| {
                TimetableError::database_operation(format!("Failed to list lessons: {e}"))
            })?;

        Ok(models.into_iter().map(|m| m.into_lesson()).collect())
    }

    /// 开启写入课程的事务
    ///
    /// SQLite 的写锁本身就把写事务串行化；其他数据库用 SERIALIZABLE 隔离级别，
    /// 范围查询与写入之间插入的并发写入会让其中一个事务失败。
    async fn begin_commit_txn(&self) -> Result<DatabaseTransaction> {
        let txn = if self.db.get_database_backend() == DbBackend::Sqlite {
            self.db.begin().await
        } else {
            self.db
                .begin_with_config(Some(IsolationLevel::Serializable), None)
                .await
        };
        txn.map_err(|e| TimetableError::from_db("Failed to begin transaction", e))
    }

    /// 写入课程
    ///
    /// 取范围、冲突检查、写入在同一事务内完成。
    /// 并发事务冲突时整体重试，超过次数后返回 `TransactionConflict`。
    pub async fn commit_lesson_impl(
        &self,
        lesson: Lesson,
        mode: CommitMode,
    ) -> Result<CommitOutcome> {
        let mut attempt = 1;
        loop {
            match self.try_commit_lesson(&lesson, mode).await {
                Err(TimetableError::TransactionConflict(msg)) if attempt < MAX_COMMIT_ATTEMPTS => {
                    warn!(
                        lesson_id = %lesson.id,
                        attempt,
                        "Lesson commit hit a concurrent transaction, retrying: {}",
                        msg
                    );
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn try_commit_lesson(&self, lesson: &Lesson, mode: CommitMode) -> Result<CommitOutcome> {
        let txn = self.begin_commit_txn().await?;

        let schedule = ensure_schedule(&txn, &lesson.group_id, &lesson.semester_id).await?;

        let persisted = Lessons::find_by_id(lesson.id.clone())
            .one(&txn)
            .await
            .map_err(|e| TimetableError::from_db("Failed to query lesson", e))?;

        // 更新时课程可能已被并发删除，不能借更新重新创建
        match (mode, &persisted) {
            (CommitMode::Create, Some(_)) => {
                return Err(TimetableError::conflict(format!(
                    "Lesson {} already exists",
                    lesson.id
                )));
            }
            (CommitMode::Update, None) => {
                return Err(TimetableError::not_found(format!(
                    "Lesson {} not found",
                    lesson.id
                )));
            }
            _ => {}
        }

        let scope = LessonScope::for_candidate(lesson);
        let existing = fetch_scope(&txn, &scope).await?;
        let violations = can_add_lesson(lesson, &existing);
        if !violations.is_empty() {
            warn!(
                lesson_id = %lesson.id,
                group_id = %lesson.group_id,
                violations = violations.len(),
                "Lesson rejected by conflict check"
            );
            // 丢弃事务即回滚
            return Ok(CommitOutcome::Rejected(violations));
        }

        let model = into_active_model(lesson);
        let saved = match persisted {
            Some(previous) => {
                // 创建时间不随更新改变
                let mut model = model;
                model.created_at = Set(previous.created_at);
                model.update(&txn).await
            }
            None => model.insert(&txn).await,
        }
        .map_err(|e| TimetableError::from_db("Failed to save lesson", e))?;

        touch_schedule(&txn, schedule).await?;

        txn.commit()
            .await
            .map_err(|e| TimetableError::from_db("Failed to commit transaction", e))?;

        info!(
            lesson_id = %saved.id,
            group_id = %saved.group_id,
            semester_id = %saved.semester_id,
            "Lesson committed"
        );

        Ok(CommitOutcome::Committed(saved.into_lesson()))
    }

    /// 删除课程
    pub async fn delete_lesson_impl(&self, id: &str) -> Result<bool> {
        let txn = self.db.begin().await.map_err(|e| {
            TimetableError::database_operation(format!("Failed to begin transaction: {e}"))
        })?;

        let Some(lesson) = Lessons::find_by_id(id.to_string())
            .one(&txn)
            .await
            .map_err(|e| {
                TimetableError::database_operation(format!("Failed to query lesson: {e}"))
            })?
        else {
            return Ok(false);
        };

        let result = Lessons::delete_by_id(id.to_string())
            .exec(&txn)
            .await
            .map_err(|e| {
                TimetableError::database_operation(format!("Failed to delete lesson: {e}"))
            })?;

        let schedule = Schedules::find()
            .filter(ScheduleColumn::GroupId.eq(lesson.group_id.as_str()))
            .filter(ScheduleColumn::SemesterId.eq(lesson.semester_id.as_str()))
            .one(&txn)
            .await
            .map_err(|e| {
                TimetableError::database_operation(format!("Failed to query schedule: {e}"))
            })?;
        if let Some(schedule) = schedule {
            touch_schedule(&txn, schedule).await?;
        }

        txn.commit().await.map_err(|e| {
            TimetableError::database_operation(format!("Failed to commit transaction: {e}"))
        })?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::models::lessons::entities::{ConflictDimension, LessonType, WeekType};
    use crate::models::schedules::requests::{CreateScheduleRequest, ScheduleListQuery};

    async fn memory_storage() -> SeaOrmStorage {
        SeaOrmStorage::connect(&DatabaseConfig {
            url: "sqlite::memory:".into(),
            // 内存库每个连接各自独立，只能用一个连接
            pool_size: 1,
            timeout: 5,
        })
        .await
        .expect("in-memory sqlite should connect")
    }

    fn lesson(id: &str, group_id: &str, teacher_id: Option<&str>, room: &str) -> Lesson {
        Lesson {
            id: id.into(),
            group_id: group_id.into(),
            semester_id: "S1".into(),
            subject_id: "MATH".into(),
            teacher_id: teacher_id.map(Into::into),
            room: room.into(),
            lesson_type: LessonType::Lecture,
            day_of_week: 2,
            start_time: "09:00".into(),
            end_time: "10:30".into(),
            week_type: WeekType::All,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn committed(outcome: CommitOutcome) -> Lesson {
        match outcome {
            CommitOutcome::Committed(lesson) => lesson,
            CommitOutcome::Rejected(v) => panic!("unexpected rejection: {v:?}"),
        }
    }

    #[actix_web::test]
    async fn test_commit_creates_schedule_and_lesson() {
        let storage = memory_storage().await;
        let saved = committed(
            storage
                .commit_lesson_impl(lesson("L1", "G1", Some("T1"), "101"), CommitMode::Create)
                .await
                .unwrap(),
        );
        assert_eq!(saved.id, "L1");

        let schedule = storage
            .get_schedule_by_group_and_semester_impl("G1", "S1")
            .await
            .unwrap();
        assert!(schedule.is_some());
        assert!(storage.get_lesson_by_id_impl("L1").await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_commit_rejects_cross_group_teacher_conflict() {
        let storage = memory_storage().await;
        committed(
            storage
                .commit_lesson_impl(lesson("L1", "G1", Some("T1"), "101"), CommitMode::Create)
                .await
                .unwrap(),
        );

        let outcome = storage
            .commit_lesson_impl(lesson("L2", "G2", Some("T1"), "202"), CommitMode::Create)
            .await
            .unwrap();
        match outcome {
            CommitOutcome::Rejected(violations) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].dimension, ConflictDimension::Teacher);
                assert_eq!(violations[0].lesson_id, "L1");
            }
            CommitOutcome::Committed(_) => panic!("conflicting lesson was committed"),
        }
        assert!(storage.get_lesson_by_id_impl("L2").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_update_does_not_conflict_with_itself() {
        let storage = memory_storage().await;
        let saved = committed(
            storage
                .commit_lesson_impl(lesson("L1", "G1", Some("T1"), "101"), CommitMode::Create)
                .await
                .unwrap(),
        );

        let mut moved = saved.clone();
        moved.start_time = "09:30".into();
        moved.end_time = "11:00".into();
        let updated = committed(
            storage
                .commit_lesson_impl(moved, CommitMode::Update)
                .await
                .unwrap(),
        );
        assert_eq!(updated.start_time, "09:30");
        assert_eq!(updated.created_at, saved.created_at);

        let all = storage
            .list_lessons_impl(LessonListQuery::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[actix_web::test]
    async fn test_scope_excludes_other_semesters() {
        let storage = memory_storage().await;
        let mut other_term = lesson("L1", "G1", Some("T1"), "101");
        other_term.semester_id = "S0".into();
        committed(
            storage
                .commit_lesson_impl(other_term, CommitMode::Create)
                .await
                .unwrap(),
        );

        let candidate = lesson("L2", "G1", Some("T1"), "101");
        let scope = LessonScope::for_candidate(&candidate);
        assert!(
            storage
                .fetch_lessons_for_scope_impl(&scope)
                .await
                .unwrap()
                .is_empty()
        );
        committed(
            storage
                .commit_lesson_impl(candidate, CommitMode::Create)
                .await
                .unwrap(),
        );
    }

    #[actix_web::test]
    async fn test_delete_schedule_removes_lessons() {
        let storage = memory_storage().await;
        let schedule = storage
            .create_schedule_impl(CreateScheduleRequest {
                group_id: "G1".into(),
                semester_id: "S1".into(),
                semester_label: Some("Autumn".into()),
                year_label: Some("2025/2026".into()),
            })
            .await
            .unwrap();
        committed(
            storage
                .commit_lesson_impl(lesson("L1", "G1", None, ""), CommitMode::Create)
                .await
                .unwrap(),
        );

        let duplicate = storage
            .create_schedule_impl(CreateScheduleRequest {
                group_id: "G1".into(),
                semester_id: "S1".into(),
                semester_label: None,
                year_label: None,
            })
            .await;
        assert_eq!(duplicate.unwrap_err().code(), "E005");

        let listed = storage
            .list_schedules_with_pagination_impl(ScheduleListQuery::default())
            .await
            .unwrap();
        assert_eq!(listed.pagination.total, 1);

        assert!(storage.delete_schedule_impl(&schedule.id).await.unwrap());
        assert!(storage.get_lesson_by_id_impl("L1").await.unwrap().is_none());
        assert!(!storage.delete_schedule_impl(&schedule.id).await.unwrap());
    }

    #[actix_web::test]
    async fn test_delete_lesson() {
        let storage = memory_storage().await;
        committed(
            storage
                .commit_lesson_impl(lesson("L1", "G1", Some("T1"), "101"), CommitMode::Create)
                .await
                .unwrap(),
        );
        assert!(storage.delete_lesson_impl("L1").await.unwrap());
        assert!(!storage.delete_lesson_impl("L1").await.unwrap());
    }

    #[actix_web::test]
    async fn test_update_after_delete_does_not_recreate() {
        let storage = memory_storage().await;
        committed(
            storage
                .commit_lesson_impl(lesson("L1", "G1", Some("T1"), "101"), CommitMode::Create)
                .await
                .unwrap(),
        );
        let mut fetched = storage.get_lesson_by_id_impl("L1").await.unwrap().unwrap();
        assert!(storage.delete_lesson_impl("L1").await.unwrap());

        fetched.room = "102".into();
        let result = storage
            .commit_lesson_impl(fetched, CommitMode::Update)
            .await;
        assert!(matches!(result, Err(TimetableError::NotFound(_))));
        assert!(storage.get_lesson_by_id_impl("L1").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_create_with_existing_id_is_refused() {
        let storage = memory_storage().await;
        committed(
            storage
                .commit_lesson_impl(lesson("L1", "G1", Some("T1"), "101"), CommitMode::Create)
                .await
                .unwrap(),
        );

        let mut duplicate = lesson("L1", "G1", Some("T1"), "101");
        duplicate.day_of_week = 5;
        let result = storage
            .commit_lesson_impl(duplicate, CommitMode::Create)
            .await;
        assert!(matches!(result, Err(TimetableError::Conflict(_))));

        let stored = storage.get_lesson_by_id_impl("L1").await.unwrap().unwrap();
        assert_eq!(stored.day_of_week, 2);
    }
}
