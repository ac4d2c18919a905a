//! # clinic-lang
//!
//! 兽医诊所管理页面的法语/英语整页切换工具库。
//!
//! ## 模块组织
//!
//! - `core` - 文档处理流程（解析、执行操作、渲染通知、序列化）
//! - `parsers` - HTML 解析和 DOM 操作
//! - `translation` - 短语表、翻译引擎和语言切换
//! - `storage` - 偏好存储（内存、redb）
//! - `notification` - 可自动消失的无障碍通知
//! - `ui` - 表单校验、批量删除和购物车
//! - `env` - 类型安全的环境变量访问

pub mod core;
pub mod env;
pub mod notification;
pub mod parsers;
pub mod storage;
pub mod translation;
pub mod ui;

// Re-export commonly used items for convenience
pub use crate::core::*;
pub use notification::{Notification, NotificationProfile, Notifier, Severity};
pub use parsers::*;
pub use storage::{MemoryStore, PreferenceStore, RedbStore};
pub use translation::{
    LangConfig, LangError, LangResult, LanguageCode, LanguageSwitcher, TranslationEngine,
};
