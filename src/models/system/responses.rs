use serde::Serialize;
use ts_rs::TS;

// 存活检查响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub uptime_seconds: i64,
    // 一周内可排课的天数（6 或 7）
    pub max_day_of_week: u8,
}
