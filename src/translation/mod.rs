//! 翻译模块
//!
//! 法语/英语双语页面的整页短语替换：
//! - **dictionary**: 内置短语数据
//! - **phrases**: 短语表与重复键策略
//! - **collector**: 可翻译位置的枚举
//! - **engine**: 短语替换
//! - **language**: 语言代码与语言状态
//! - **switcher**: 语言切换控制器
//! - **config**: 配置管理
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use clinic_lang::parsers::html_to_dom;
//! use clinic_lang::storage::MemoryStore;
//! use clinic_lang::translation::LanguageSwitcher;
//!
//! let dom = html_to_dom(b"<html><body><th>Nom</th></body></html>", "utf-8").unwrap();
//! let mut switcher = LanguageSwitcher::new(MemoryStore::new());
//! switcher.select_language(&dom, "en");
//! ```

pub mod collector;
pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod language;
pub mod phrases;
pub mod switcher;

pub use collector::{CollectionStats, Surface, SurfaceAccess, SurfaceCollector, SurfaceKind};
pub use config::{constants, ConfigManager, LangConfig};
pub use engine::{TranslationEngine, TranslationReport};
pub use error::{ErrorCategory, ErrorSeverity, LangError, LangResult};
pub use language::{LanguageCode, LanguageState, PREFERENCE_KEY};
pub use phrases::{ConflictPolicy, PhraseBook, PhraseFile, PhraseTable};
pub use switcher::{switch_message, LanguageSwitcher, SwitchOutcome};
