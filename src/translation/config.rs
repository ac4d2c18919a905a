//! 配置管理模块
//!
//! 按 默认值 → 配置文件 → 环境变量 的顺序分层加载配置

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::notification::NotificationProfile;
use crate::translation::error::{LangError, LangResult};
use crate::translation::phrases::{ConflictPolicy, PhraseBook, PhraseFile};

/// 配置常量
pub mod constants {
    pub const CONFIG_PATHS: &[&str] = &[
        "clinic-lang.toml",
        ".clinic-lang.toml",
        "~/.config/clinic-lang/config.toml",
    ];

    pub const ENV_PREFIX: &str = "CLINIC_LANG";

    // 默认配置值
    pub const DEFAULT_STORE_PATH: &str = "~/.local/share/clinic-lang/preferences.redb";
    pub const DEFAULT_LANG_BUTTON_CLASS: &str = "lang-btn";
    pub const DEFAULT_ACTIVE_CLASS: &str = "active";
    pub const DEFAULT_GREETING_FR_CLASS: &str = "welcome-fr";
    pub const DEFAULT_GREETING_EN_CLASS: &str = "welcome-en";
    pub const DEFAULT_GREETING_DISPLAY: &str = "inline";
    pub const DEFAULT_TITLE_SEPARATOR: &str = "|";
    pub const DEFAULT_BULK_ENDPOINT: &str = "/bulk-delete/clients/";
    pub const DEFAULT_FORM_IDS: &[&str] = &[
        "addClientForm",
        "editClientForm",
        "addAnimalForm",
        "editAnimalForm",
    ];
    pub const DEFAULT_INVALID_CLASS: &str = "invalid";
}

/// 完整配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LangConfig {
    pub selectors: SelectorConfig,
    pub title: TitleConfig,
    pub startup: StartupConfig,
    pub notifications: NotificationConfig,
    pub phrases: PhraseConfig,
    pub store: StoreConfig,
    pub forms: FormsConfig,
    pub bulk: BulkConfig,
}

/// 语言选择控件和问候语的选择器
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SelectorConfig {
    /// 语言选择按钮的 class
    pub lang_button_class: String,
    /// 选中按钮的 class
    pub active_class: String,
    /// 仅在法语下显示的问候语 class
    pub greeting_fr_class: String,
    /// 仅在英语下显示的问候语 class
    pub greeting_en_class: String,
    /// 问候语显示时的 `display` 值
    pub greeting_display: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TitleConfig {
    /// 是否在标题后追加语言后缀
    pub annotate: bool,
    /// 标题中已存在该分隔符时不再追加
    pub separator: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StartupConfig {
    /// 启动时是否也显示语言切换通知
    pub notify_on_initialize: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NotificationConfig {
    pub profiles: HashMap<String, NotificationProfile>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PhraseConfig {
    /// 附加短语文件（TOML）
    pub extra_path: Option<String>,
    /// 附加短语与已有短语冲突时的策略
    pub conflict_policy: ConflictPolicy,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoreConfig {
    /// 偏好存储文件路径
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FormsConfig {
    pub form_ids: Vec<String>,
    pub invalid_class: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BulkConfig {
    /// 批量删除接口路径（相对于站点地址）
    pub endpoint: String,
}

impl Default for LangConfig {
    fn default() -> Self {
        Self {
            selectors: SelectorConfig {
                lang_button_class: constants::DEFAULT_LANG_BUTTON_CLASS.to_string(),
                active_class: constants::DEFAULT_ACTIVE_CLASS.to_string(),
                greeting_fr_class: constants::DEFAULT_GREETING_FR_CLASS.to_string(),
                greeting_en_class: constants::DEFAULT_GREETING_EN_CLASS.to_string(),
                greeting_display: constants::DEFAULT_GREETING_DISPLAY.to_string(),
            },
            title: TitleConfig {
                annotate: true,
                separator: constants::DEFAULT_TITLE_SEPARATOR.to_string(),
            },
            startup: StartupConfig {
                notify_on_initialize: false,
            },
            notifications: NotificationConfig {
                profiles: NotificationProfile::defaults(),
            },
            phrases: PhraseConfig {
                extra_path: None,
                conflict_policy: ConflictPolicy::LastWriteWins,
            },
            store: StoreConfig {
                path: constants::DEFAULT_STORE_PATH.to_string(),
            },
            forms: FormsConfig {
                form_ids: constants::DEFAULT_FORM_IDS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                invalid_class: constants::DEFAULT_INVALID_CLASS.to_string(),
            },
            bulk: BulkConfig {
                endpoint: constants::DEFAULT_BULK_ENDPOINT.to_string(),
            },
        }
    }
}

impl LangConfig {
    /// 偏好存储文件路径（展开 `~`）
    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.store.path).as_ref())
    }

    /// 构建短语表：内置短语加上配置的附加短语
    pub fn build_phrase_book(&self) -> LangResult<PhraseBook> {
        let mut book = PhraseBook::builtin();

        if let Some(ref extra) = self.phrases.extra_path {
            let path = shellexpand::tilde(extra);
            let file = PhraseFile::from_path(path.as_ref())?;
            let merged = book.merge(file, self.phrases.conflict_policy)?;
            tracing::info!("从 {} 合并了 {} 条附加短语", path, merged);
        }

        Ok(book)
    }

    /// 验证配置
    pub fn validate(&self) -> LangResult<()> {
        let selectors = [
            ("selectors.lang_button_class", &self.selectors.lang_button_class),
            ("selectors.active_class", &self.selectors.active_class),
            ("selectors.greeting_fr_class", &self.selectors.greeting_fr_class),
            ("selectors.greeting_en_class", &self.selectors.greeting_en_class),
        ];
        for (name, value) in selectors {
            if value.trim().is_empty() {
                return Err(LangError::ConfigError(format!("{} 不能为空", name)));
            }
        }

        if self.title.annotate && self.title.separator.is_empty() {
            return Err(LangError::ConfigError(
                "启用标题后缀时分隔符不能为空".to_string(),
            ));
        }

        for (slot, profile) in &self.notifications.profiles {
            if profile.dismiss_after_ms == 0 {
                return Err(LangError::ConfigError(format!(
                    "通知槽位 '{}' 的消失延迟不能为0",
                    slot
                )));
            }
        }

        if self.store.path.trim().is_empty() {
            return Err(LangError::ConfigError("存储路径不能为空".to_string()));
        }

        Ok(())
    }
}

/// 配置管理器
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: LangConfig,
    config_path: Option<String>,
}

impl ConfigManager {
    /// 按默认搜索路径加载配置
    pub fn new() -> LangResult<Self> {
        Self::load(None)
    }

    /// 加载配置，`explicit_path` 优先于默认搜索路径
    pub fn load(explicit_path: Option<&Path>) -> LangResult<Self> {
        Self::load_dotenv();

        let mut builder = Config::builder().add_source(
            Config::try_from(&LangConfig::default())
                .map_err(|e| LangError::ConfigError(format!("默认配置错误: {}", e)))?,
        );

        let mut config_path = None;
        match explicit_path {
            Some(path) => {
                if !path.exists() {
                    return Err(LangError::ConfigError(format!(
                        "配置文件不存在: {}",
                        path.display()
                    )));
                }
                builder = builder.add_source(File::from(path));
                config_path = Some(path.display().to_string());
            }
            None => {
                for path in constants::CONFIG_PATHS {
                    let expanded_path = shellexpand::tilde(path);
                    if Path::new(expanded_path.as_ref()).exists() {
                        builder = builder.add_source(File::with_name(&expanded_path));
                        config_path = Some(expanded_path.to_string());
                        break;
                    }
                }
            }
        }

        if let Some(ref path) = config_path {
            tracing::info!("加载配置文件: {}", path);
        }

        builder = builder.add_source(
            Environment::with_prefix(constants::ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: LangConfig = builder
            .build()
            .map_err(|e| LangError::ConfigError(format!("构建配置失败: {}", e)))?
            .try_deserialize()
            .map_err(|e| LangError::ConfigError(format!("反序列化配置失败: {}", e)))?;

        config.validate()?;

        Ok(Self {
            config,
            config_path,
        })
    }

    /// 直接使用给定配置
    pub fn from_config(config: LangConfig) -> LangResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            config_path: None,
        })
    }

    pub fn get_config(&self) -> &LangConfig {
        &self.config
    }

    pub fn into_config(self) -> LangConfig {
        self.config
    }

    pub fn config_path(&self) -> Option<&str> {
        self.config_path.as_deref()
    }

    /// 加载 .env 文件
    fn load_dotenv() {
        let env_files = [".env.local", ".env"];

        for env_file in &env_files {
            if Path::new(env_file).exists() {
                match dotenv::from_filename(env_file) {
                    Ok(_) => {
                        tracing::debug!("已加载环境变量文件: {}", env_file);
                        break;
                    }
                    Err(e) => {
                        tracing::warn!("无法加载环境变量文件 {}: {}", env_file, e);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = LangConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.notifications.profiles["store"].dismiss_after_ms, 3000);
        assert_eq!(config.notifications.profiles["language"].dismiss_after_ms, 5000);
    }

    #[test]
    fn test_validation_rejects_zero_delay() {
        let mut config = LangConfig::default();
        config
            .notifications
            .profiles
            .insert("language".to_string(), NotificationProfile::new(0, "notification"));

        assert!(matches!(config.validate(), Err(LangError::ConfigError(_))));
    }

    #[test]
    fn test_load_explicit_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            "[title]\nannotate = false\nseparator = \"|\"\n\n[store]\npath = \"/tmp/clinic-prefs.redb\"\n"
        )
        .unwrap();

        let manager = ConfigManager::load(Some(file.path())).unwrap();
        let config = manager.get_config();

        assert!(!config.title.annotate);
        assert_eq!(config.store.path, "/tmp/clinic-prefs.redb");
        assert_eq!(config.selectors.lang_button_class, "lang-btn");
        assert!(manager.config_path().is_some());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = ConfigManager::load(Some(Path::new("/nonexistent/clinic-lang.toml")));
        assert!(matches!(result, Err(LangError::ConfigError(_))));
    }

    #[test]
    fn test_build_phrase_book_with_extra_file() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "[[en]]\nfrom = \"Vaccins\"\nto = \"Vaccines\"").unwrap();

        let mut config = LangConfig::default();
        config.phrases.extra_path = Some(file.path().display().to_string());

        let book = config.build_phrase_book().unwrap();
        assert_eq!(
            book.table(crate::translation::language::LanguageCode::En).get("Vaccins"),
            Some("Vaccines")
        );
    }
}
