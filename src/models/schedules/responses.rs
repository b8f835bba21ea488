use super::entities::Schedule;
use crate::models::common::PaginationInfo;
use crate::models::lessons::entities::Lesson;
use serde::Serialize;
use ts_rs::TS;

// 课表列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct ScheduleListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Schedule>,
}

// 课表详情：课表本身及其课程（按星期、开始时间排序）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct ScheduleDetailResponse {
    pub schedule: Schedule,
    pub lessons: Vec<Lesson>,
}
