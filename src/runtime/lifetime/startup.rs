use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::schedules::requests::ScheduleListQuery;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 启动时输出当前数据概况
async fn report_schedule_stats(storage: &Arc<dyn Storage>) {
    let query = ScheduleListQuery {
        page: Some(1),
        size: Some(1),
        ..Default::default()
    };

    match storage.list_schedules_with_pagination(query).await {
        Ok(response) => {
            info!(
                "Storage contains {} schedule(s)",
                response.pagination.total
            );
        }
        Err(e) => {
            warn!("Failed to count schedules: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储初始化与数据库迁移
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let config = AppConfig::get();
    debug!(
        "Scheduling week has {} day(s)",
        config.schedule.max_day_of_week
    );

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    report_schedule_stats(&storage).await;

    Ok(StartupContext { storage })
}
