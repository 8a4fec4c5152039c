//! Encrypted file-backed implementation of `SecureKeyStore`.
// 中文: `SecureKeyStore` 的加密文件存储实现。

#![cfg(feature = "secure-storage")]

use super::container::EncryptedKeyContainer;
use super::query::KeyQuery;
use super::traits::{SecureKeyStore, StorageError};
use crate::common::utils::ZeroizingVec;
use secrecy::SecretString;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A durable store persisting each key half as an `EncryptedKeyContainer`
/// inside a single JSON file.
///
/// The file is re-read on every operation and replaced atomically
/// (write to a temporary file, then rename) on every mutation, so a
/// crash mid-write never leaves a half-written store behind. Nothing is
/// cached between calls.
///
/// 中文: 将每个密钥半边封装为 `EncryptedKeyContainer` 并持久化到
/// 单个 JSON 文件中的存储。每次操作都重新读取文件，每次写入都通过
/// 临时文件加重命名原子替换，调用之间不缓存任何内容。
pub struct EncryptedFileStore {
    path: PathBuf,
    password: SecretString,
}

impl EncryptedFileStore {
    /// Creates a store backed by the file at `path`, sealed with `password`.
    /// The file is created lazily on the first `put`.
    ///
    /// 中文: 创建一个以 `path` 处文件为后端、以 `password` 封装的存储。
    /// 文件在第一次 `put` 时才会被创建。
    pub fn new(path: impl Into<PathBuf>, password: SecretString) -> Self {
        Self {
            path: path.into(),
            password,
        }
    }

    fn load_entries(&self) -> Result<BTreeMap<String, EncryptedKeyContainer>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let json = fs::read_to_string(&self.path)?;
        if json.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&json)?)
    }

    fn save_entries(
        &self,
        entries: &BTreeMap<String, EncryptedKeyContainer>,
    ) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(entries)?;

        // 原子写入：同目录临时文件 + 重命名
        let parent = self.path.parent().unwrap_or(Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }
}

impl SecureKeyStore for EncryptedFileStore {
    fn put(&self, query: &KeyQuery, material: &[u8]) -> Result<(), StorageError> {
        let container = EncryptedKeyContainer::new(&self.password, material)?;

        let mut entries = self.load_entries()?;
        entries.insert(query.storage_key(), container);
        self.save_entries(&entries)?;
        debug!(storage_key = %query.storage_key(), "stored sealed key material");
        Ok(())
    }

    fn get(&self, query: &KeyQuery) -> Result<Option<ZeroizingVec>, StorageError> {
        let entries = self.load_entries()?;
        match entries.get(&query.storage_key()) {
            Some(container) => Ok(Some(container.get_key(&self.password)?)),
            None => Ok(None),
        }
    }

    fn delete(&self, query: &KeyQuery) -> Result<(), StorageError> {
        let mut entries = self.load_entries()?;
        if entries.remove(&query.storage_key()).is_some() {
            self.save_entries(&entries)?;
            debug!(storage_key = %query.storage_key(), "deleted sealed key material");
        }
        Ok(())
    }

    fn contains(&self, query: &KeyQuery) -> Result<bool, StorageError> {
        Ok(self.load_entries()?.contains_key(&query.storage_key()))
    }
}
