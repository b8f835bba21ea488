//! 课程实体

use sea_orm::entity::prelude::*;
use tracing::warn;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub group_id: String,
    pub semester_id: String,
    pub subject_id: String,
    pub teacher_id: Option<String>,
    pub room: String,
    pub lesson_type: String,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub week_type: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_lesson(self) -> crate::models::lessons::entities::Lesson {
        use crate::models::lessons::entities::{
            Lesson, LessonType, WeekType, normalize_teacher_id,
        };
        use chrono::{DateTime, Utc};

        // 未知的周类型按"每周"处理
        let week_type = self.week_type.parse::<WeekType>().unwrap_or_else(|_| {
            warn!(
                lesson_id = %self.id,
                week_type = %self.week_type,
                "Unknown week type in database, treating as 'all'"
            );
            WeekType::All
        });

        let lesson_type = self.lesson_type.parse::<LessonType>().unwrap_or_else(|_| {
            warn!(
                lesson_id = %self.id,
                lesson_type = %self.lesson_type,
                "Unknown lesson type in database, treating as 'lecture'"
            );
            LessonType::Lecture
        });

        Lesson {
            lesson_type,
            week_type,
            // 超出 u8 的值保留为 0，冲突检查会把它当作非法数据跳过
            day_of_week: u8::try_from(self.day_of_week).unwrap_or(0),
            teacher_id: normalize_teacher_id(self.teacher_id),
            id: self.id,
            group_id: self.group_id,
            semester_id: self.semester_id,
            subject_id: self.subject_id,
            room: self.room,
            start_time: self.start_time,
            end_time: self.end_time,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
