//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 课程冲突不属于错误：冲突以 `Violation` 列表的形式返回。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_timetable_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum TimetableError {
            $($variant(String),)*
        }

        impl TimetableError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(TimetableError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(TimetableError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(TimetableError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl TimetableError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        TimetableError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_timetable_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    NotFound("E004", "Resource Not Found"),
    Conflict("E005", "Resource Conflict"),
    TransactionConflict("E006", "Transaction Conflict"),
}

// 并发事务冲突的 SQLSTATE：40001 串行化失败（MySQL 死锁同码），40P01 PostgreSQL 死锁
const RETRYABLE_SQLSTATES: [&str; 2] = ["40001", "40P01"];

/// 数据库错误是否为并发事务冲突（重试即可）
pub fn is_transaction_conflict(err: &sea_orm::DbErr) -> bool {
    use sea_orm::{DbErr, RuntimeErr};

    let code = match err {
        DbErr::Exec(RuntimeErr::SqlxError(e))
        | DbErr::Query(RuntimeErr::SqlxError(e))
        | DbErr::Conn(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .and_then(|db| db.code())
            .map(|code| code.into_owned()),
        _ => None,
    };
    if let Some(code) = code {
        return RETRYABLE_SQLSTATES.contains(&code.as_str());
    }

    let message = err.to_string();
    message.contains("could not serialize access") || message.contains("Deadlock found")
}

impl TimetableError {
    /// 转换数据库错误，并发事务冲突单独归类
    pub fn from_db(context: &str, err: sea_orm::DbErr) -> Self {
        if is_transaction_conflict(&err) {
            TimetableError::TransactionConflict(format!("{context}: {err}"))
        } else {
            TimetableError::DatabaseOperation(format!("{context}: {err}"))
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TimetableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TimetableError {}

pub type Result<T> = std::result::Result<T, TimetableError>;
