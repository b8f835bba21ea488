//! 内存存储实现（仅测试使用）

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::errors::{Result, TimetableError};
use crate::models::{
    PaginationInfo,
    lessons::{
        entities::Lesson,
        requests::{LessonListQuery, LessonScope},
    },
    schedules::{
        entities::Schedule,
        requests::{CreateScheduleRequest, ScheduleListQuery},
        responses::ScheduleListResponse,
    },
};
use crate::scheduling::can_add_lesson;
use crate::storage::{CommitMode, CommitOutcome, Storage};

/// 基于 HashMap 的存储，语义与 SeaORM 实现保持一致
#[derive(Clone, Default)]
pub struct MockStorage {
    schedules: Arc<RwLock<HashMap<String, Schedule>>>,
    lessons: Arc<RwLock<HashMap<String, Lesson>>>,
}

#[allow(dead_code)]
impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置课程（不做冲突检查）
    pub fn with_lessons(self, lessons: Vec<Lesson>) -> Self {
        {
            let mut stored = self.lessons.write().unwrap();
            for lesson in lessons {
                stored.insert(lesson.id.clone(), lesson);
            }
        }
        self
    }

    pub fn lesson_count(&self) -> usize {
        self.lessons.read().unwrap().len()
    }

    fn sorted(mut lessons: Vec<Lesson>) -> Vec<Lesson> {
        lessons.sort_by(|a, b| {
            (a.day_of_week, &a.start_time, &a.id).cmp(&(b.day_of_week, &b.start_time, &b.id))
        });
        lessons
    }

    fn ensure_schedule(&self, group_id: &str, semester_id: &str) {
        let mut schedules = self.schedules.write().unwrap();
        let exists = schedules
            .values()
            .any(|s| s.group_id == group_id && s.semester_id == semester_id);
        if !exists {
            let now = chrono::Utc::now();
            let id = uuid::Uuid::new_v4().to_string();
            schedules.insert(
                id.clone(),
                Schedule {
                    id,
                    group_id: group_id.to_string(),
                    semester_id: semester_id.to_string(),
                    semester_label: None,
                    year_label: None,
                    created_at: now,
                    updated_at: now,
                },
            );
        }
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn create_schedule(&self, req: CreateScheduleRequest) -> Result<Schedule> {
        let mut schedules = self.schedules.write().unwrap();
        if schedules
            .values()
            .any(|s| s.group_id == req.group_id && s.semester_id == req.semester_id)
        {
            return Err(TimetableError::conflict(format!(
                "Schedule for group {} in semester {} already exists",
                req.group_id, req.semester_id
            )));
        }
        let now = chrono::Utc::now();
        let schedule = Schedule {
            id: uuid::Uuid::new_v4().to_string(),
            group_id: req.group_id,
            semester_id: req.semester_id,
            semester_label: req.semester_label,
            year_label: req.year_label,
            created_at: now,
            updated_at: now,
        };
        schedules.insert(schedule.id.clone(), schedule.clone());
        Ok(schedule)
    }

    async fn get_schedule_by_id(&self, id: &str) -> Result<Option<Schedule>> {
        Ok(self.schedules.read().unwrap().get(id).cloned())
    }

    async fn get_schedule_by_group_and_semester(
        &self,
        group_id: &str,
        semester_id: &str,
    ) -> Result<Option<Schedule>> {
        Ok(self
            .schedules
            .read()
            .unwrap()
            .values()
            .find(|s| s.group_id == group_id && s.semester_id == semester_id)
            .cloned())
    }

    async fn list_schedules_with_pagination(
        &self,
        query: ScheduleListQuery,
    ) -> Result<ScheduleListResponse> {
        let page = query.page.unwrap_or(1).max(1);
        let size = query.size.unwrap_or(20).clamp(1, 100);
        let mut items: Vec<Schedule> = self
            .schedules
            .read()
            .unwrap()
            .values()
            .filter(|s| query.group_id.as_ref().is_none_or(|g| &s.group_id == g))
            .filter(|s| {
                query
                    .semester_id
                    .as_ref()
                    .is_none_or(|sem| &s.semester_id == sem)
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| a.group_id.cmp(&b.group_id));

        let total = items.len() as i64;
        let items = items
            .into_iter()
            .skip(((page - 1) * size) as usize)
            .take(size as usize)
            .collect();
        Ok(ScheduleListResponse {
            items,
            pagination: PaginationInfo {
                page,
                page_size: size,
                total,
                total_pages: (total + size - 1) / size,
            },
        })
    }

    async fn delete_schedule(&self, id: &str) -> Result<bool> {
        let Some(schedule) = self.schedules.write().unwrap().remove(id) else {
            return Ok(false);
        };
        self.lessons.write().unwrap().retain(|_, l| {
            !(l.group_id == schedule.group_id && l.semester_id == schedule.semester_id)
        });
        Ok(true)
    }

    async fn fetch_lessons_for_scope(&self, scope: &LessonScope) -> Result<Vec<Lesson>> {
        let lessons = self
            .lessons
            .read()
            .unwrap()
            .values()
            .filter(|l| scope.matches(l))
            .cloned()
            .collect();
        Ok(Self::sorted(lessons))
    }

    async fn get_lesson_by_id(&self, id: &str) -> Result<Option<Lesson>> {
        Ok(self.lessons.read().unwrap().get(id).cloned())
    }

    async fn list_lessons(&self, query: LessonListQuery) -> Result<Vec<Lesson>> {
        let lessons = self
            .lessons
            .read()
            .unwrap()
            .values()
            .filter(|l| query.group_id.as_ref().is_none_or(|g| &l.group_id == g))
            .filter(|l| {
                query
                    .semester_id
                    .as_ref()
                    .is_none_or(|s| &l.semester_id == s)
            })
            .filter(|l| {
                query
                    .teacher_id
                    .as_ref()
                    .is_none_or(|t| l.teacher_id.as_ref() == Some(t))
            })
            .filter(|l| query.room.as_ref().is_none_or(|r| l.room == r.trim()))
            .filter(|l| query.day_of_week.is_none_or(|d| l.day_of_week == d))
            .cloned()
            .collect();
        Ok(Self::sorted(lessons))
    }

    async fn commit_lesson(&self, lesson: Lesson, mode: CommitMode) -> Result<CommitOutcome> {
        // 整个写入过程持有写锁，相当于事务
        let mut lessons = self.lessons.write().unwrap();
        let previous_created_at = lessons.get(&lesson.id).map(|l| l.created_at);
        match (mode, previous_created_at) {
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

        let scope = LessonScope::for_candidate(&lesson);
        let existing: Vec<Lesson> = Self::sorted(
            lessons
                .values()
                .filter(|l| scope.matches(l))
                .cloned()
                .collect(),
        );
        let violations = can_add_lesson(&lesson, &existing);
        if !violations.is_empty() {
            return Ok(CommitOutcome::Rejected(violations));
        }

        let mut lesson = lesson;
        if let Some(created_at) = previous_created_at {
            lesson.created_at = created_at;
        }
        lessons.insert(lesson.id.clone(), lesson.clone());
        drop(lessons);

        self.ensure_schedule(&lesson.group_id, &lesson.semester_id);
        Ok(CommitOutcome::Committed(lesson))
    }

    async fn delete_lesson(&self, id: &str) -> Result<bool> {
        Ok(self.lessons.write().unwrap().remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lessons::entities::{LessonType, WeekType};

    fn lesson(id: &str) -> Lesson {
        Lesson {
            id: id.into(),
            group_id: "G1".into(),
            semester_id: "S1".into(),
            subject_id: "MATH".into(),
            teacher_id: Some("T1".into()),
            room: "101".into(),
            lesson_type: LessonType::Lecture,
            day_of_week: 2,
            start_time: "09:00".into(),
            end_time: "10:30".into(),
            week_type: WeekType::All,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[actix_web::test]
    async fn test_update_after_delete_does_not_recreate() {
        let storage = MockStorage::new().with_lessons(vec![lesson("L1")]);
        let mut fetched = storage.get_lesson_by_id("L1").await.unwrap().unwrap();
        assert!(storage.delete_lesson("L1").await.unwrap());

        fetched.room = "102".into();
        let result = storage.commit_lesson(fetched, CommitMode::Update).await;
        assert!(matches!(result, Err(TimetableError::NotFound(_))));
        assert_eq!(storage.lesson_count(), 0);
    }

    #[actix_web::test]
    async fn test_create_with_existing_id_is_refused() {
        let storage = MockStorage::new().with_lessons(vec![lesson("L1")]);
        let result = storage.commit_lesson(lesson("L1"), CommitMode::Create).await;
        assert!(matches!(result, Err(TimetableError::Conflict(_))));
        assert_eq!(storage.lesson_count(), 1);
    }
}
