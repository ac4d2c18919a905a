//! 偏好存储模块
//!
//! 跨会话保存的键值字符串存储（相当于浏览器按源隔离的 localStorage）：
//!
//! - `PreferenceStore` - 存储接口
//! - `MemoryStore` - 进程内存储，用于测试和临时运行
//! - `RedbStore` - 基于 redb 的磁盘存储

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::translation::error::{LangError, LangResult};

pub mod redb_store;

pub use redb_store::RedbStore;

/// 键值字符串存储
pub trait PreferenceStore {
    /// 读取键对应的值，不存在时返回 `None`
    fn load(&self, key: &str) -> LangResult<Option<String>>;

    /// 写入键值
    fn save(&self, key: &str, value: &str) -> LangResult<()>;

    /// 删除键
    fn remove(&self, key: &str) -> LangResult<()>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Arc<S> {
    fn load(&self, key: &str) -> LangResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> LangResult<()> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> LangResult<()> {
        (**self).remove(key)
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &S {
    fn load(&self, key: &str) -> LangResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> LangResult<()> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> LangResult<()> {
        (**self).remove(key)
    }
}

/// 进程内存储
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> LangResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| LangError::StorageError(format!("读取锁失败: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> LangResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| LangError::StorageError(format!("写入锁失败: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> LangResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| LangError::StorageError(format!("写入锁失败: {}", e)))?;
        entries.remove(key);
        Ok(())
    }
}
