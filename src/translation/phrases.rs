//! 短语表
//!
//! 从规范的 `(键, 值)` 列表构建精确匹配的短语表，并显式处理重复键。

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::translation::dictionary::{TO_ENGLISH, TO_FRENCH};
use crate::translation::error::{LangError, LangResult};
use crate::translation::language::LanguageCode;

/// 重复键处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// 后写入的值覆盖先前的值，并记录警告
    #[default]
    LastWriteWins,
    /// 遇到重复键时报错
    Reject,
}

/// 单一目标语言的短语表
///
/// 键为另一种语言的短语（区分大小写、已去除首尾空白），值为目标语言短语。
#[derive(Debug, Clone)]
pub struct PhraseTable {
    target: LanguageCode,
    entries: HashMap<String, String>,
}

impl PhraseTable {
    pub fn new(target: LanguageCode) -> Self {
        Self {
            target,
            entries: HashMap::new(),
        }
    }

    /// 从 `(键, 值)` 列表构建
    pub fn from_pairs<I, K, V>(target: LanguageCode, pairs: I, policy: ConflictPolicy) -> LangResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new(target);
        for (key, value) in pairs {
            table.insert(key.into(), value.into(), policy)?;
        }
        Ok(table)
    }

    /// 插入一条短语，返回被覆盖的旧值
    pub fn insert(
        &mut self,
        key: String,
        value: String,
        policy: ConflictPolicy,
    ) -> LangResult<Option<String>> {
        let key = key.trim().to_string();
        if key.is_empty() {
            return Err(LangError::ParseError(format!(
                "短语键不能为空 ({})",
                self.target
            )));
        }

        match self.entries.get(&key).cloned() {
            Some(existing) if policy == ConflictPolicy::Reject => {
                Err(LangError::DuplicatePhrase {
                    language: self.target.to_string(),
                    key,
                    existing,
                    incoming: value,
                })
            }
            Some(existing) => {
                if existing != value {
                    tracing::warn!(
                        "短语表 {} 中的重复键 '{}': '{}' 被 '{}' 覆盖",
                        self.target,
                        key,
                        existing,
                        value
                    );
                } else {
                    tracing::debug!("短语表 {} 中的重复键 '{}' 值相同", self.target, key);
                }
                Ok(self.entries.insert(key, value))
            }
            None => Ok(self.entries.insert(key, value)),
        }
    }

    /// 精确查找
    pub fn get(&self, phrase: &str) -> Option<&str> {
        self.entries.get(phrase).map(String::as_str)
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.entries.contains_key(phrase)
    }

    pub fn target(&self) -> LanguageCode {
        self.target
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn builtin(target: LanguageCode, pairs: &[(&str, &str)]) -> Self {
        let mut table = Self::new(target);
        for (key, value) in pairs {
            // 内置数据的键非空，覆盖策略不会失败
            if let Err(e) = table.insert(key.to_string(), value.to_string(), ConflictPolicy::LastWriteWins) {
                tracing::error!("内置短语无效: {}", e);
            }
        }
        table
    }
}

/// 附加短语文件中的单条短语
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PhraseEntry {
    pub from: String,
    pub to: String,
}

/// 附加短语文件格式
///
/// ```toml
/// [[fr]]
/// from = "Vaccinations"
/// to = "Vaccinations"
///
/// [[en]]
/// from = "Rappel de vaccin"
/// to = "Vaccine reminder"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PhraseFile {
    #[serde(default)]
    pub fr: Vec<PhraseEntry>,
    #[serde(default)]
    pub en: Vec<PhraseEntry>,
}

impl PhraseFile {
    pub fn from_toml(content: &str) -> LangResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> LangResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| LangError::IoError(format!("无法读取短语文件 {}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }
}

/// 两个方向的短语表
#[derive(Debug, Clone)]
pub struct PhraseBook {
    to_french: PhraseTable,
    to_english: PhraseTable,
}

impl PhraseBook {
    pub fn new(to_french: PhraseTable, to_english: PhraseTable) -> Self {
        Self {
            to_french,
            to_english,
        }
    }

    /// 内置短语表（重复键按后写覆盖处理）
    pub fn builtin() -> Self {
        Self {
            to_french: PhraseTable::builtin(LanguageCode::Fr, TO_FRENCH),
            to_english: PhraseTable::builtin(LanguageCode::En, TO_ENGLISH),
        }
    }

    /// 空短语表，任何翻译都不会发生
    pub fn empty() -> Self {
        Self {
            to_french: PhraseTable::new(LanguageCode::Fr),
            to_english: PhraseTable::new(LanguageCode::En),
        }
    }

    /// 目标语言对应的短语表
    pub fn table(&self, target: LanguageCode) -> &PhraseTable {
        match target {
            LanguageCode::Fr => &self.to_french,
            LanguageCode::En => &self.to_english,
        }
    }

    fn table_mut(&mut self, target: LanguageCode) -> &mut PhraseTable {
        match target {
            LanguageCode::Fr => &mut self.to_french,
            LanguageCode::En => &mut self.to_english,
        }
    }

    /// 将附加短语合并到现有表中，返回合并的条数
    pub fn merge(&mut self, file: PhraseFile, policy: ConflictPolicy) -> LangResult<usize> {
        let mut merged = 0;
        for (target, entries) in [(LanguageCode::Fr, file.fr), (LanguageCode::En, file.en)] {
            let table = self.table_mut(target);
            for entry in entries {
                table.insert(entry.from, entry.to, policy)?;
                merged += 1;
            }
        }
        Ok(merged)
    }
}

impl Default for PhraseBook {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_duplicates_last_write_wins() {
        let book = PhraseBook::builtin();

        // 'Nom' 先映射为 'Last Name'，后被 'Name' 覆盖
        assert_eq!(book.table(LanguageCode::En).get("Nom"), Some("Name"));
        assert_eq!(book.table(LanguageCode::En).get("Modifier"), Some("Edit"));
        assert_eq!(book.table(LanguageCode::Fr).get("Dashboard"), Some("Tableau de Bord"));
        assert_eq!(book.table(LanguageCode::Fr).get("Name"), Some("Nom"));
    }

    #[test]
    fn test_lookup_is_exact_and_case_sensitive() {
        let book = PhraseBook::builtin();
        let table = book.table(LanguageCode::En);

        assert_eq!(
            table.get("Rechercher un client..."),
            Some("Search for a client...")
        );
        assert_eq!(table.get("nom"), None);
        assert_eq!(table.get("Nom "), None);
    }

    #[test]
    fn test_reject_policy() {
        let result = PhraseTable::from_pairs(
            LanguageCode::En,
            [("Nom", "Last Name"), ("Nom", "Name")],
            ConflictPolicy::Reject,
        );

        match result {
            Err(LangError::DuplicatePhrase { key, existing, incoming, .. }) => {
                assert_eq!(key, "Nom");
                assert_eq!(existing, "Last Name");
                assert_eq!(incoming, "Name");
            }
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_phrase_file() {
        let file = PhraseFile::from_toml(
            r#"
            [[en]]
            from = "Rappel de vaccin"
            to = "Vaccine reminder"

            [[fr]]
            from = "Vaccine reminder"
            to = "Rappel de vaccin"
            "#,
        )
        .unwrap();

        let mut book = PhraseBook::builtin();
        let merged = book.merge(file, ConflictPolicy::Reject).unwrap();

        assert_eq!(merged, 2);
        assert_eq!(
            book.table(LanguageCode::En).get("Rappel de vaccin"),
            Some("Vaccine reminder")
        );
    }

    #[test]
    fn test_merge_rejects_collision_with_builtin() {
        let file = PhraseFile::from_toml("[[en]]\nfrom = \"Nom\"\nto = \"Surname\"\n").unwrap();
        let mut book = PhraseBook::builtin();

        assert!(book.merge(file, ConflictPolicy::Reject).is_err());
    }
}
