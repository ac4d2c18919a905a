//! 语言代码与当前语言状态

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::storage::PreferenceStore;
use crate::translation::error::{LangError, LangResult};

/// 偏好存储中保存当前语言的键
pub const PREFERENCE_KEY: &str = "preferred-language";

/// 支持的显示语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    Fr,
    #[default]
    En,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 2] = [LanguageCode::Fr, LanguageCode::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::Fr => "fr",
            LanguageCode::En => "en",
        }
    }

    /// 解析语言代码，无法识别时返回 `None`
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "fr" => Some(LanguageCode::Fr),
            "en" => Some(LanguageCode::En),
            _ => None,
        }
    }

    /// 另一种语言
    pub fn other(&self) -> Self {
        match self {
            LanguageCode::Fr => LanguageCode::En,
            LanguageCode::En => LanguageCode::Fr,
        }
    }

    /// 标题后缀，例如 `FR`
    pub fn title_tag(&self) -> &'static str {
        match self {
            LanguageCode::Fr => "FR",
            LanguageCode::En => "EN",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = LangError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageCode::parse(s).ok_or_else(|| LangError::UnknownLanguage(s.to_string()))
    }
}

/// 当前语言状态
///
/// 由单个控制器持有，在启动和每次切换时显式地读写偏好存储。
#[derive(Debug, Clone, Default)]
pub struct LanguageState {
    current: LanguageCode,
}

impl LanguageState {
    pub fn new(current: LanguageCode) -> Self {
        Self { current }
    }

    pub fn current(&self) -> LanguageCode {
        self.current
    }

    pub fn set(&mut self, language: LanguageCode) {
        self.current = language;
    }

    /// 从偏好存储读取语言
    ///
    /// 没有记录、记录无法识别或存储故障时都回退到默认语言 `en`。
    pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> Self {
        let current = match store.load(PREFERENCE_KEY) {
            Ok(Some(value)) => LanguageCode::parse(&value).unwrap_or_else(|| {
                tracing::warn!("存储的语言偏好无法识别: {}，使用默认语言", value);
                LanguageCode::default()
            }),
            Ok(None) => LanguageCode::default(),
            Err(e) => {
                tracing::warn!("读取语言偏好失败，使用默认语言: {}", e);
                LanguageCode::default()
            }
        };

        Self { current }
    }

    /// 将当前语言写回偏好存储
    pub fn save<S: PreferenceStore + ?Sized>(&self, store: &S) -> LangResult<()> {
        store.save(PREFERENCE_KEY, self.current.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(LanguageCode::parse("fr"), Some(LanguageCode::Fr));
        assert_eq!(LanguageCode::parse("en"), Some(LanguageCode::En));
        assert_eq!(LanguageCode::parse("FR"), None);
        assert_eq!(LanguageCode::parse("de"), None);
        assert!("es".parse::<LanguageCode>().is_err());
    }

    #[test]
    fn test_load_defaults_to_english() {
        let store = MemoryStore::new();
        assert_eq!(LanguageState::load(&store).current(), LanguageCode::En);

        store.save(PREFERENCE_KEY, "klingon").unwrap();
        assert_eq!(LanguageState::load(&store).current(), LanguageCode::En);
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        LanguageState::new(LanguageCode::Fr).save(&store).unwrap();

        assert_eq!(
            store.load(PREFERENCE_KEY).unwrap().as_deref(),
            Some("fr")
        );
        assert_eq!(LanguageState::load(&store).current(), LanguageCode::Fr);
    }
}
