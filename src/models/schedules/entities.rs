use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课表：一个班组在一个学期内的全部课程
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct Schedule {
    // 课表ID
    pub id: String,
    // 班组ID
    pub group_id: String,
    // 学期ID
    pub semester_id: String,
    // 学期名称，例如 "Autumn"
    pub semester_label: Option<String>,
    // 学年名称，例如 "2025/2026"
    pub year_label: Option<String>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
