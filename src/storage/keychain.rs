//! OS credential-service backend (macOS Keychain, Windows Credential
//! Manager, Linux Secret Service).
// 中文: 操作系统凭据服务后端。

#![cfg(feature = "keychain-store")]

use super::query::KeyQuery;
use super::traits::{SecureKeyStore, StorageError};
use crate::common::utils::ZeroizingVec;
use keyring::Entry;
use tracing::debug;

/// A store backed by the operating system's credential service.
///
/// Entries are scoped by a service name, so multiple applications can
/// share one credential namespace without collisions. Availability of
/// stored entries follows the platform's unlock semantics, which is what
/// the `Accessibility::WhenUnlocked` query policy expresses.
///
/// 中文: 由操作系统凭据服务支撑的存储。条目以服务名限定作用域，
/// 多个应用共享凭据命名空间时互不冲突。条目的可用性遵循平台自身的
/// 解锁语义，与查询中的 `Accessibility::WhenUnlocked` 策略对应。
#[derive(Clone)]
pub struct KeychainStore {
    service_name: String,
}

impl KeychainStore {
    /// Create a new keychain store for the specified app.
    /// 中文: 为指定应用创建一个凭据服务存储。
    pub fn for_app(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    fn entry(&self, query: &KeyQuery) -> Result<Entry, StorageError> {
        Entry::new(&self.service_name, &query.storage_key())
            .map_err(|e| StorageError::Backend(e.to_string()))
    }
}

impl SecureKeyStore for KeychainStore {
    fn put(&self, query: &KeyQuery, material: &[u8]) -> Result<(), StorageError> {
        self.entry(query)?
            .set_secret(material)
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        debug!(
            service = %self.service_name,
            storage_key = %query.storage_key(),
            "stored key material in credential service"
        );
        Ok(())
    }

    fn get(&self, query: &KeyQuery) -> Result<Option<ZeroizingVec>, StorageError> {
        match self.entry(query)?.get_secret() {
            Ok(material) => Ok(Some(ZeroizingVec(material))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StorageError::Backend(e.to_string())),
        }
    }

    fn delete(&self, query: &KeyQuery) -> Result<(), StorageError> {
        match self.entry(query)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StorageError::Backend(e.to_string())),
        }
    }
}
