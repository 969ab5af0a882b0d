//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_tracker_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum TrackerError {
            $($variant(String),)*
        }

        impl TrackerError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(TrackerError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(TrackerError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(TrackerError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl TrackerError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        TrackerError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_tracker_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    DatabaseConfig("E002", "Database Configuration Error"),
    DatabaseConnection("E003", "Database Connection Error"),
    DatabaseOperation("E004", "Database Operation Error"),
    FileOperation("E005", "File Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
    PasswordHash("E010", "Password Hash Error"),
    Startup("E011", "Startup Error"),
}

impl TrackerError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为外键约束失败（被引用的学生或用户不存在）
    pub fn is_foreign_key_violation(&self) -> bool {
        let msg = self.message();
        msg.contains("FOREIGN KEY constraint failed")
            || msg.contains("violates foreign key constraint")
            || msg.contains("a foreign key constraint fails")
    }

    /// 是否为唯一约束冲突
    pub fn is_unique_violation(&self) -> bool {
        let msg = self.message();
        msg.contains("UNIQUE constraint failed")
            || msg.contains("duplicate key value")
            || msg.contains("Duplicate entry")
    }
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TrackerError {}

impl From<sea_orm::DbErr> for TrackerError {
    fn from(err: sea_orm::DbErr) -> Self {
        TrackerError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        TrackerError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for TrackerError {
    fn from(err: chrono::ParseError) -> Self {
        TrackerError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TrackerError::cache_connection("redis down").code(), "E001");
        assert_eq!(TrackerError::database_operation("boom").code(), "E004");
        assert_eq!(TrackerError::validation("bad").code(), "E006");
        assert_eq!(TrackerError::password_hash("argon2").code(), "E010");
    }

    #[test]
    fn test_display_uses_type_name() {
        let err = TrackerError::not_found("Student 42");
        assert_eq!(err.to_string(), "Resource Not Found: Student 42");
    }

    #[test]
    fn test_constraint_detection() {
        let sqlite_fk = TrackerError::database_operation(
            "Execution Error: error returned from database: (code: 787) FOREIGN KEY constraint failed",
        );
        assert!(sqlite_fk.is_foreign_key_violation());
        assert!(!sqlite_fk.is_unique_violation());

        let pg_unique = TrackerError::database_operation(
            "duplicate key value violates unique constraint \"users_username_key\"",
        );
        assert!(pg_unique.is_unique_violation());
        assert!(!pg_unique.is_foreign_key_violation());
    }

    #[test]
    fn test_from_chrono_parse_error() {
        let parse_err = chrono::NaiveDate::parse_from_str("2024-13-40", "%Y-%m-%d").unwrap_err();
        let err: TrackerError = parse_err.into();
        assert_eq!(err.code(), "E009");
    }
}
