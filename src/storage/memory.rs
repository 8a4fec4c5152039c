//! In-memory implementation of `SecureKeyStore`.
// 中文: `SecureKeyStore` 的内存实现。

use crate::common::utils::ZeroizingVec;
use crate::storage::query::KeyQuery;
use crate::storage::traits::{SecureKeyStore, StorageError};
use dashmap::DashMap;

/// A process-local store keeping key material in memory only.
///
/// Entries vanish when the store is dropped, so pairs persisted here are
/// only as durable as the process itself. This backend doubles as the
/// test fake for everything built on `SecureKeyStore`.
///
/// 中文: 只在进程内存中保存密钥材料的存储。
/// 存储被丢弃时所有条目随之消失，因此写入这里的"持久化"密钥对
/// 最多与进程同寿。该后端同时充当所有基于 `SecureKeyStore`
/// 构建的组件的测试假实现。
#[derive(Default)]
pub struct MemoryKeyStore {
    entries: DashMap<String, ZeroizingVec>,
}

impl MemoryKeyStore {
    /// Creates an empty store.
    /// 中文: 创建一个空存储。
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SecureKeyStore for MemoryKeyStore {
    fn put(&self, query: &KeyQuery, material: &[u8]) -> Result<(), StorageError> {
        self.entries
            .insert(query.storage_key(), ZeroizingVec(material.to_vec()));
        Ok(())
    }

    fn get(&self, query: &KeyQuery) -> Result<Option<ZeroizingVec>, StorageError> {
        Ok(self
            .entries
            .get(&query.storage_key())
            .map(|entry| entry.value().clone()))
    }

    fn delete(&self, query: &KeyQuery) -> Result<(), StorageError> {
        self.entries.remove(&query.storage_key());
        Ok(())
    }

    fn contains(&self, query: &KeyQuery) -> Result<bool, StorageError> {
        Ok(self.entries.contains_key(&query.storage_key()))
    }
}
