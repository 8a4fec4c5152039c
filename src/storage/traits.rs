//! Traits for abstracting secure key storage backends.
// 中文: 用于抽象安全密钥存储后端的 Trait。

use crate::common::utils::ZeroizingVec;
use crate::storage::query::KeyQuery;
use thiserror::Error;

/// Errors reported by secure store backends.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("Serialization error (JSON)")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "secure-storage")]
    #[error("Encrypted container error")]
    Container(#[from] crate::storage::container::ContainerError),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Defines the universal interface for secure credential stores.
///
/// This trait abstracts the capability of persisting and retrieving key
/// material by a structured query. It decouples the `KeyPairManager` from
/// the specifics of any storage backend, such as an in-memory map, an
/// encrypted file or the operating system's credential service, and makes
/// the manager testable against an in-memory fake.
///
/// All operations are synchronous and blocking. Consistency under
/// concurrent writers of the same entry is delegated to the backend;
/// no locking is performed at this layer.
///
/// 中文: 定义了安全凭据存储的通用接口。
///
/// 这个 Trait 抽象了"按结构化查询持久化与检索密钥材料"的能力，
/// 将 `KeyPairManager` 与具体后端（内存映射、加密文件或操作系统
/// 凭据服务）解耦，并使管理器可以针对内存假实现进行测试。
///
/// 所有操作同步阻塞。同一条目并发写入时的一致性完全委托给后端，
/// 本层不做任何加锁。
pub trait SecureKeyStore: Send + Sync + 'static {
    /// Stores key material under the given query, replacing any
    /// previous entry with the same storage key.
    ///
    /// 中文: 以给定查询存入密钥材料，覆盖相同存储键下的旧条目。
    fn put(&self, query: &KeyQuery, material: &[u8]) -> Result<(), StorageError>;

    /// Looks up the key material matching the query.
    /// Returns `Ok(None)` when no entry matches.
    ///
    /// 中文: 查找匹配该查询的密钥材料；没有匹配条目时返回 `Ok(None)`。
    fn get(&self, query: &KeyQuery) -> Result<Option<ZeroizingVec>, StorageError>;

    /// Removes the entry matching the query.
    /// Removing an absent entry is not an error.
    ///
    /// 中文: 删除匹配该查询的条目；条目不存在不算错误。
    fn delete(&self, query: &KeyQuery) -> Result<(), StorageError>;

    /// Returns `true` if an entry matching the query exists.
    ///
    /// 中文: 判断匹配该查询的条目是否存在。
    fn contains(&self, query: &KeyQuery) -> Result<bool, StorageError> {
        Ok(self.get(query)?.is_some())
    }
}
