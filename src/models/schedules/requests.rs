use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 课表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct ScheduleQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub group_id: Option<String>,
    pub semester_id: Option<String>,
}

// 创建课表请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct CreateScheduleRequest {
    pub group_id: String,
    pub semester_id: String,
    pub semester_label: Option<String>,
    pub year_label: Option<String>,
}

// 课表列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct ScheduleListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub group_id: Option<String>,
    pub semester_id: Option<String>,
}
