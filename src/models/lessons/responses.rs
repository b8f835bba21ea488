use super::entities::{Lesson, Violation};
use serde::Serialize;
use ts_rs::TS;

// 课程列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "lesson.ts")]
pub struct LessonListResponse {
    pub total: i64,
    pub items: Vec<Lesson>,
}

// 冲突预检响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "lesson.ts")]
pub struct LessonCheckResponse {
    pub can_add: bool,
    pub violations: Vec<Violation>,
}

impl LessonCheckResponse {
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            can_add: violations.is_empty(),
            violations,
        }
    }
}

// 冲突时随错误响应返回的完整冲突列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "lesson.ts")]
pub struct LessonConflictResponse {
    pub violations: Vec<Violation>,
}
