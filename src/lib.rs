//! Timetable - 课表排课服务
//!
//! 基于 Actix Web 构建的课表后端，核心是排课冲突检查：
//! 新增或修改课程时，同一班组、同一教师、同一教室不能在同一时段重复占用。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `scheduling`: 排课冲突检查
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod scheduling;
pub mod services;
pub mod storage;
pub mod utils;
