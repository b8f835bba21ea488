use serde::{Deserialize, Deserializer};
use ts_rs::TS;

use super::entities::{Lesson, LessonType, WeekType, normalize_teacher_id};

// 反序列化时统一"无教师"：null / "" / "no_teacher" -> None
fn deserialize_teacher_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(normalize_teacher_id(raw))
}

// 更新请求中的教师字段：缺省表示不修改，显式 null / "" / "no_teacher" 表示取消指派
fn deserialize_teacher_update<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(Some(normalize_teacher_id(raw)))
}

// 创建课程请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "lesson.ts")]
pub struct CreateLessonRequest {
    pub group_id: String,
    pub semester_id: String,
    pub subject_id: String,
    #[serde(default, deserialize_with = "deserialize_teacher_id")]
    #[ts(optional)]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub room: String,
    #[serde(rename = "type")]
    pub lesson_type: LessonType,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub week_type: WeekType,
}

impl CreateLessonRequest {
    /// 构造候选课程；教室去掉首尾空白
    pub fn into_lesson(self, id: String, now: chrono::DateTime<chrono::Utc>) -> Lesson {
        Lesson {
            id,
            group_id: self.group_id.trim().to_string(),
            semester_id: self.semester_id.trim().to_string(),
            subject_id: self.subject_id.trim().to_string(),
            teacher_id: self.teacher_id,
            room: self.room.trim().to_string(),
            lesson_type: self.lesson_type,
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
            week_type: self.week_type,
            created_at: now,
            updated_at: now,
        }
    }
}

// 冲突预检请求
//
// 编辑已有课程时带上 `id`，该课程自身不会被当作冲突。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "lesson.ts")]
pub struct CheckLessonRequest {
    #[ts(optional)]
    pub id: Option<String>,
    #[serde(flatten)]
    #[ts(flatten)]
    pub lesson: CreateLessonRequest,
}

// 更新课程请求：只包含需要修改的字段
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "lesson.ts")]
pub struct UpdateLessonRequest {
    pub subject_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_teacher_update")]
    #[ts(type = "string | null")]
    pub teacher_id: Option<Option<String>>,
    pub room: Option<String>,
    #[serde(rename = "type")]
    pub lesson_type: Option<LessonType>,
    pub day_of_week: Option<u8>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub week_type: Option<WeekType>,
}

impl UpdateLessonRequest {
    /// 把修改合并到已有课程上，得到新的候选课程（ID 与归属不变）
    pub fn apply_to(self, existing: &Lesson) -> Lesson {
        let mut lesson = existing.clone();
        if let Some(subject_id) = self.subject_id {
            lesson.subject_id = subject_id;
        }
        if let Some(teacher_id) = self.teacher_id {
            lesson.teacher_id = teacher_id;
        }
        if let Some(room) = self.room {
            lesson.room = room.trim().to_string();
        }
        if let Some(lesson_type) = self.lesson_type {
            lesson.lesson_type = lesson_type;
        }
        if let Some(day_of_week) = self.day_of_week {
            lesson.day_of_week = day_of_week;
        }
        if let Some(start_time) = self.start_time {
            lesson.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            lesson.end_time = end_time;
        }
        if let Some(week_type) = self.week_type {
            lesson.week_type = week_type;
        }
        lesson.updated_at = chrono::Utc::now();
        lesson
    }
}

// 课程列表查询参数（来自HTTP请求，用于教师 / 教室 / 班组的课表视图）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "lesson.ts")]
pub struct LessonListQuery {
    pub group_id: Option<String>,
    pub semester_id: Option<String>,
    pub teacher_id: Option<String>,
    pub room: Option<String>,
    pub day_of_week: Option<u8>,
}

/// 冲突检查的取数范围（用于存储层）
///
/// 取同一学期内：与候选课程同班组、或同教师（已指派时）、或同教室（非空时）的全部课程。
/// 指定 `day_of_week` 时只取当天的课程。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonScope {
    pub semester_id: String,
    pub group_id: String,
    pub teacher_id: Option<String>,
    pub room: Option<String>,
    pub day_of_week: Option<u8>,
}

impl LessonScope {
    /// 候选课程的冲突检查范围
    pub fn for_candidate(candidate: &Lesson) -> Self {
        let room = candidate.room.trim();
        Self {
            semester_id: candidate.semester_id.clone(),
            group_id: candidate.group_id.clone(),
            teacher_id: candidate.teacher_id.clone(),
            room: (!room.is_empty()).then(|| room.to_string()),
            day_of_week: Some(candidate.day_of_week),
        }
    }

    /// 课程是否落在该范围内（与存储层的查询条件一致）
    pub fn matches(&self, lesson: &Lesson) -> bool {
        if lesson.semester_id != self.semester_id {
            return false;
        }
        if let Some(day) = self.day_of_week
            && lesson.day_of_week != day
        {
            return false;
        }
        lesson.group_id == self.group_id
            || (self.teacher_id.is_some() && lesson.teacher_id == self.teacher_id)
            || self.room.as_deref() == Some(lesson.room.trim())
    }
}
