//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod lessons;
mod schedules;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{Result, TimetableError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database).await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| TimetableError::database_operation(format!("Migration failed: {e}")))?;

        info!("SeaORM storage initialized, database: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        // 内存数据库没有 WAL
        let journal_mode = if url.contains(":memory:") {
            SqliteJournalMode::Memory
        } else {
            SqliteJournalMode::Wal
        };

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| {
                TimetableError::database_config(format!("Failed to parse SQLite URL: {e}"))
            })?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(journal_mode)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| {
                TimetableError::database_connection(format!("Failed to connect to SQLite: {e}"))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt).await.map_err(|e| {
            TimetableError::database_connection(format!("Failed to connect to database: {e}"))
        })
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(TimetableError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite:, postgres://, mysql://, or a .db/.sqlite file path"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
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
use crate::storage::{CommitMode, CommitOutcome, Storage};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 课表模块
    async fn create_schedule(&self, schedule: CreateScheduleRequest) -> Result<Schedule> {
        self.create_schedule_impl(schedule).await
    }

    async fn get_schedule_by_id(&self, id: &str) -> Result<Option<Schedule>> {
        self.get_schedule_by_id_impl(id).await
    }

    async fn get_schedule_by_group_and_semester(
        &self,
        group_id: &str,
        semester_id: &str,
    ) -> Result<Option<Schedule>> {
        self.get_schedule_by_group_and_semester_impl(group_id, semester_id)
            .await
    }

    async fn list_schedules_with_pagination(
        &self,
        query: ScheduleListQuery,
    ) -> Result<ScheduleListResponse> {
        self.list_schedules_with_pagination_impl(query).await
    }

    async fn delete_schedule(&self, id: &str) -> Result<bool> {
        self.delete_schedule_impl(id).await
    }

    // 课程模块
    async fn fetch_lessons_for_scope(&self, scope: &LessonScope) -> Result<Vec<Lesson>> {
        self.fetch_lessons_for_scope_impl(scope).await
    }

    async fn get_lesson_by_id(&self, id: &str) -> Result<Option<Lesson>> {
        self.get_lesson_by_id_impl(id).await
    }

    async fn list_lessons(&self, query: LessonListQuery) -> Result<Vec<Lesson>> {
        self.list_lessons_impl(query).await
    }

    async fn commit_lesson(&self, lesson: Lesson, mode: CommitMode) -> Result<CommitOutcome> {
        self.commit_lesson_impl(lesson, mode).await
    }

    async fn delete_lesson(&self, id: &str) -> Result<bool> {
        self.delete_lesson_impl(id).await
    }
}
