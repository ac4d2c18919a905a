//! 基于 redb 的磁盘偏好存储

use std::path::{Path, PathBuf};

use redb::{Database, ReadableTable, TableDefinition, TableError};

use crate::translation::error::LangResult;

use super::PreferenceStore;

const PREFERENCES: TableDefinition<&str, &str> = TableDefinition::new("preferences");

/// 磁盘偏好存储
pub struct RedbStore {
    db: Database,
    path: PathBuf,
}

impl RedbStore {
    /// 打开（必要时创建）存储文件
    pub fn open<P: AsRef<Path>>(path: P) -> LangResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Database::create(&path)?;
        tracing::debug!("打开偏好存储: {}", path.display());

        Ok(Self { db, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 列出全部键值（按键排序）
    pub fn entries(&self) -> LangResult<Vec<(String, String)>> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(PREFERENCES) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for item in table.iter()? {
            let (key, value) = item?;
            entries.push((key.value().to_string(), value.value().to_string()));
        }
        Ok(entries)
    }
}

impl PreferenceStore for RedbStore {
    fn load(&self, key: &str) -> LangResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(PREFERENCES) {
            Ok(table) => table,
            // 从未写入过任何偏好
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let value = table.get(key)?.map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn save(&self, key: &str, value: &str) -> LangResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(PREFERENCES)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> LangResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(PREFERENCES)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redb_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.redb");

        {
            let store = RedbStore::open(&path).unwrap();
            assert_eq!(store.load("preferred-language").unwrap(), None);
            store.save("preferred-language", "fr").unwrap();
        }

        let store = RedbStore::open(&path).unwrap();
        assert_eq!(
            store.load("preferred-language").unwrap().as_deref(),
            Some("fr")
        );

        store.remove("preferred-language").unwrap();
        assert_eq!(store.load("preferred-language").unwrap(), None);
        assert!(store.entries().unwrap().is_empty());
    }
}
