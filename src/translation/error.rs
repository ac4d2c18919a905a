//! 统一错误处理
//!
//! 提供结构化错误类型和错误处理机制，翻译引擎、偏好存储、通知和页面辅助功能共用

use std::fmt;

use thiserror::Error;

/// 错误类型
#[derive(Error, Debug, Clone)]
pub enum LangError {
    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 存储错误（偏好存储读写失败、配额、数据库不可用）
    #[error("存储错误: {0}")]
    StorageError(String),

    /// 解析错误
    #[error("解析错误: {0}")]
    ParseError(String),

    /// DOM 操作错误
    #[error("DOM错误: {0}")]
    DomError(String),

    /// 无法识别的语言代码
    #[error("无法识别的语言代码: {0}")]
    UnknownLanguage(String),

    /// 短语表中出现重复键
    #[error("重复短语 '{key}' ({language}): '{existing}' 与 '{incoming}' 冲突")]
    DuplicatePhrase {
        language: String,
        key: String,
        existing: String,
        incoming: String,
    },

    /// 购物车数量超出范围
    #[error("商品 {id} 的数量 {quantity} 无法调整 {change}")]
    QuantityOverflow { id: u64, quantity: i64, change: i64 },

    /// 通知系统错误
    #[error("通知错误: {0}")]
    NotificationError(String),

    /// 网络错误
    #[error("网络错误: {0}")]
    NetworkError(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    SerializationError(String),

    /// 输入输出错误
    #[error("IO错误: {0}")]
    IoError(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl LangError {
    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LangError::ConfigError(_) => ErrorSeverity::Critical,
            LangError::StorageError(_) => ErrorSeverity::Warning,
            LangError::ParseError(_) => ErrorSeverity::Error,
            LangError::DomError(_) => ErrorSeverity::Warning,
            LangError::UnknownLanguage(_) => ErrorSeverity::Info,
            LangError::DuplicatePhrase { .. } => ErrorSeverity::Error,
            LangError::QuantityOverflow { .. } => ErrorSeverity::Warning,
            LangError::NotificationError(_) => ErrorSeverity::Warning,
            LangError::NetworkError(_) => ErrorSeverity::Error,
            LangError::SerializationError(_) => ErrorSeverity::Error,
            LangError::IoError(_) => ErrorSeverity::Error,
            LangError::InternalError(_) => ErrorSeverity::Critical,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            LangError::ConfigError(_) => ErrorCategory::Configuration,
            LangError::StorageError(_) => ErrorCategory::Storage,
            LangError::ParseError(_) => ErrorCategory::Parsing,
            LangError::DomError(_) => ErrorCategory::Dom,
            LangError::UnknownLanguage(_) => ErrorCategory::Input,
            LangError::DuplicatePhrase { .. } => ErrorCategory::Dictionary,
            LangError::QuantityOverflow { .. } => ErrorCategory::Input,
            LangError::NotificationError(_) => ErrorCategory::Notification,
            LangError::NetworkError(_) => ErrorCategory::Network,
            LangError::SerializationError(_) => ErrorCategory::Serialization,
            LangError::IoError(_) => ErrorCategory::Io,
            LangError::InternalError(_) => ErrorCategory::Internal,
        }
    }

    /// 创建带上下文的错误
    pub fn with_context<T: fmt::Display>(mut self, context: T) -> Self {
        // 结构化错误保持原样
        if matches!(
            self,
            LangError::DuplicatePhrase { .. } | LangError::QuantityOverflow { .. }
        ) {
            return self;
        }
        let new_msg = format!("{} (上下文: {})", self.message(), context);

        match &mut self {
            LangError::ConfigError(ref mut msg)
            | LangError::StorageError(ref mut msg)
            | LangError::ParseError(ref mut msg)
            | LangError::DomError(ref mut msg)
            | LangError::UnknownLanguage(ref mut msg)
            | LangError::NotificationError(ref mut msg)
            | LangError::NetworkError(ref mut msg)
            | LangError::SerializationError(ref mut msg)
            | LangError::IoError(ref mut msg)
            | LangError::InternalError(ref mut msg) => *msg = new_msg,
            LangError::DuplicatePhrase { .. } | LangError::QuantityOverflow { .. } => {}
        }

        self
    }

    fn message(&self) -> String {
        match self {
            LangError::ConfigError(msg)
            | LangError::StorageError(msg)
            | LangError::ParseError(msg)
            | LangError::DomError(msg)
            | LangError::UnknownLanguage(msg)
            | LangError::NotificationError(msg)
            | LangError::NetworkError(msg)
            | LangError::SerializationError(msg)
            | LangError::IoError(msg)
            | LangError::InternalError(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Storage,
    Parsing,
    Dom,
    Input,
    Dictionary,
    Notification,
    Network,
    Serialization,
    Io,
    Internal,
}

impl From<std::io::Error> for LangError {
    fn from(error: std::io::Error) -> Self {
        LangError::IoError(error.to_string())
    }
}

impl From<serde_json::Error> for LangError {
    fn from(error: serde_json::Error) -> Self {
        LangError::SerializationError(format!("JSON序列化错误: {}", error))
    }
}

impl From<toml::de::Error> for LangError {
    fn from(error: toml::de::Error) -> Self {
        LangError::ParseError(format!("TOML解析错误: {}", error))
    }
}

impl From<config::ConfigError> for LangError {
    fn from(error: config::ConfigError) -> Self {
        LangError::ConfigError(error.to_string())
    }
}

impl From<reqwest::Error> for LangError {
    fn from(error: reqwest::Error) -> Self {
        LangError::NetworkError(error.to_string())
    }
}

impl From<url::ParseError> for LangError {
    fn from(error: url::ParseError) -> Self {
        LangError::ConfigError(format!("URL无效: {}", error))
    }
}

macro_rules! storage_error_from {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for LangError {
                fn from(error: $ty) -> Self {
                    LangError::StorageError(error.to_string())
                }
            }
        )+
    };
}

storage_error_from!(
    redb::Error,
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

/// 错误结果类型别名
pub type LangResult<T> = Result<T, LangError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 按严重程度记录错误，不向上传播
    pub fn log_error(error: &LangError) {
        match error.severity() {
            ErrorSeverity::Info => tracing::info!("{}", error),
            ErrorSeverity::Warning => tracing::warn!("{}", error),
            ErrorSeverity::Error => tracing::error!("{}", error),
            ErrorSeverity::Critical => tracing::error!("严重错误: {}", error),
        }
    }

    /// 故障边界：执行操作，记录失败并吞掉错误
    pub fn guard<T, F>(operation: &str, f: F) -> Option<T>
    where
        F: FnOnce() -> LangResult<T>,
    {
        match f() {
            Ok(value) => Some(value),
            Err(error) => {
                log_error(&error.with_context(operation));
                None
            }
        }
    }

    /// 创建存储错误
    pub fn storage_error<T: fmt::Display>(msg: T) -> LangError {
        LangError::StorageError(msg.to_string())
    }

    /// 创建配置错误
    pub fn config_error<T: fmt::Display>(msg: T) -> LangError {
        LangError::ConfigError(msg.to_string())
    }

    /// 创建DOM错误
    pub fn dom_error<T: fmt::Display>(msg: T) -> LangError {
        LangError::DomError(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_appends_operation() {
        let error = LangError::StorageError("quota exceeded".to_string()).with_context("save");
        assert_eq!(error.to_string(), "存储错误: quota exceeded (上下文: save)");
    }

    #[test]
    fn test_duplicate_phrase_keeps_structure() {
        let error = LangError::DuplicatePhrase {
            language: "en".to_string(),
            key: "Nom".to_string(),
            existing: "Last Name".to_string(),
            incoming: "Name".to_string(),
        }
        .with_context("build");

        assert!(matches!(error, LangError::DuplicatePhrase { .. }));
        assert_eq!(error.category(), ErrorCategory::Dictionary);
    }

    #[test]
    fn test_guard_swallows_errors() {
        let result: Option<()> =
            helpers::guard("test", || Err(helpers::dom_error("missing body")));
        assert!(result.is_none());

        let result = helpers::guard("test", || Ok(7));
        assert_eq!(result, Some(7));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::Warning);
        assert_eq!(
            LangError::UnknownLanguage("de".to_string()).severity(),
            ErrorSeverity::Info
        );
    }
}
