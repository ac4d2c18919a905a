//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问。变量名不与配置文件的段名冲突
//! （`CLINIC_LANG_STORE_PATH` 而不是 `CLINIC_LANG_STORE`），因为配置层也会读取
//! `CLINIC_LANG` 前缀的环境变量。

use std::env;
use std::fmt;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "CLINIC_LANG_LOG_LEVEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }

    /// 禁用颜色输出
    pub struct NoColor;
    impl EnvVar<bool> for NoColor {
        const NAME: &'static str = "NO_COLOR";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Disable colored output when set to any value";

        fn parse(value: &str) -> EnvResult<bool> {
            // NO_COLOR 遵循标准：任何值都表示禁用颜色
            Ok(!value.is_empty())
        }
    }
}

/// 文件路径相关环境变量
pub mod paths {
    use super::*;

    /// 偏好存储文件
    pub struct StorePath;
    impl EnvVar<String> for StorePath {
        const NAME: &'static str = "CLINIC_LANG_STORE_PATH";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Path of the redb preference store";

        fn parse(value: &str) -> EnvResult<String> {
            parse_non_empty(value, Self::NAME)
        }
    }

    /// 配置文件
    pub struct ConfigPath;
    impl EnvVar<String> for ConfigPath {
        const NAME: &'static str = "CLINIC_LANG_CONFIG_PATH";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Explicit configuration file (overrides the search paths)";

        fn parse(value: &str) -> EnvResult<String> {
            parse_non_empty(value, Self::NAME)
        }
    }
}

/// 批量操作相关环境变量
pub mod bulk {
    use super::*;

    /// 站点地址
    pub struct BaseUrl;
    impl EnvVar<String> for BaseUrl {
        const NAME: &'static str = "CLINIC_LANG_BASE_URL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Base URL of the clinic application for bulk operations";

        fn parse(value: &str) -> EnvResult<String> {
            parse_url(value, Self::NAME)
        }
    }
}

fn parse_non_empty(value: &str, var_name: &str) -> EnvResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: "Value must not be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

fn parse_url(value: &str, var_name: &str) -> EnvResult<String> {
    match url::Url::parse(value) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {
            Ok(value.trim_end_matches('/').to_string())
        }
        Ok(parsed) => Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Unsupported URL scheme '{}'. Use http or https", parsed.scheme()),
        }),
        Err(e) => Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Invalid URL '{}': {}", value, e),
        }),
    }
}

/// 环境变量配置汇总
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub log_level: String,
    pub no_color: bool,
    pub store_path: Option<String>,
    pub config_path: Option<String>,
    pub base_url: Option<String>,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            log_level: core::LogLevel::get()?,
            no_color: core::NoColor::get()?,
            store_path: optional::<paths::StorePath, _>()?,
            config_path: optional::<paths::ConfigPath, _>()?,
            base_url: optional::<bulk::BaseUrl, _>()?,
        })
    }
}

/// 未设置时为 `None`，设置了但无效时报错
fn optional<V: EnvVar<T>, T>() -> EnvResult<Option<T>> {
    match env::var(V::NAME) {
        Ok(value) => V::parse(&value).map(Some),
        Err(_) => Ok(None),
    }
}
