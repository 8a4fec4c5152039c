//! 密钥对管理器：编排生成、持久化、检索与删除。
use crate::asymmetric::keypair::RsaKeyPair;
use crate::asymmetric::traits::RsaBlockCipher;
use crate::common::config::KeySize;
use crate::common::errors::Error;
use crate::storage::query::{KeyQuery, derived_tags};
use crate::storage::traits::SecureKeyStore;
use std::marker::PhantomData;
use tracing::debug;

/// `KeyPairManager`：面向调用者的密钥对编排入口。
///
/// 组合注入的安全存储后端与 RSA 原语引擎：生成密钥对（可选持久化）、
/// 按标识符检索、按标识符删除。所有操作同步阻塞；每次检索都会重新
/// 查询存储，不在调用之间缓存已解析的句柄。
///
/// 同一标识符上的并发生成/删除的一致性完全由存储后端决定，
/// 需要原子"不存在才创建"语义的调用方应在外部自行串行化。
pub struct KeyPairManager<E, S>
where
    E: RsaBlockCipher,
    S: SecureKeyStore,
    Error: From<E::Error>,
{
    store: S,
    _phantom: PhantomData<E>,
}

impl<E, S> KeyPairManager<E, S>
where
    E: RsaBlockCipher,
    S: SecureKeyStore,
    Error: From<E::Error>,
{
    /// 使用注入的存储后端创建管理器。
    pub fn new(store: S) -> Self {
        Self {
            store,
            _phantom: PhantomData,
        }
    }

    /// 访问底层存储。
    pub fn store(&self) -> &S {
        &self.store
    }

    /// 生成一个 RSA 密钥对。
    ///
    /// `tag` 为 `None` 时返回瞬态密钥对：句柄只存在于进程内存中，
    /// 完全不接触存储。
    ///
    /// `tag` 为 `Some` 时将两半以派生标签（`<tag>.public` /
    /// `<tag>.private`）持久化，随后从存储重新解析整个密钥对，
    /// 保证返回对象的身份与存储中实际可恢复的内容一致。
    /// 引擎失败、存储失败或解析失败都报告为 `GenerationFailed`，
    /// 绝不返回残缺的密钥对。
    ///
    /// 标签已被占用时返回 `Error::KeyAlreadyExists`：静默覆盖
    /// 不可导出的密钥材料会造成不可恢复的数据丢失，
    /// 调用方必须先显式 `delete_key_pair` 再重新生成。
    pub fn generate(&self, size: KeySize, tag: Option<&str>) -> Result<RsaKeyPair<E>, Error> {
        let Some(tag) = tag else {
            // 瞬态密钥对，不做任何存储交互
            let (public_key, private_key) = E::generate_keypair(size)
                .map_err(|e| Error::GenerationFailed(e.to_string()))?;
            debug!(bits = size.bits(), "generated transient key pair");
            return Ok(RsaKeyPair::new(public_key, private_key, None));
        };

        // 1. 占用检查（尽力而为；跨进程竞争由存储后端裁决）
        let (public_tag, private_tag) = derived_tags(tag);
        let public_query = KeyQuery::rsa_key(&public_tag);
        let private_query = KeyQuery::rsa_key(&private_tag);
        if self.store.contains(&public_query)? || self.store.contains(&private_query)? {
            return Err(Error::KeyAlreadyExists(tag.to_string()));
        }

        // 2. 生成并把两半写入存储
        let (public_key, private_key) = E::generate_keypair(size)
            .map_err(|e| Error::GenerationFailed(e.to_string()))?;
        let public_der = E::export_public_der(&public_key)
            .map_err(|e| Error::GenerationFailed(e.to_string()))?;
        let private_der = E::export_private_der(&private_key)
            .map_err(|e| Error::GenerationFailed(e.to_string()))?;
        self.store
            .put(&public_query, &public_der)
            .map_err(|e| Error::GenerationFailed(e.to_string()))?;
        self.store
            .put(&private_query, &private_der)
            .map_err(|e| Error::GenerationFailed(e.to_string()))?;
        debug!(tag, bits = size.bits(), "persisted generated key pair");

        // 3. 不信任生成返回的句柄，从存储重新解析
        self.get_key_pair(tag)
            .map_err(|e| Error::GenerationFailed(e.to_string()))
    }

    /// 按标识符检索已持久化的密钥对。
    ///
    /// 两半以派生标签独立查询，必须都命中才返回 `RsaKeyPair`；
    /// 任一半缺失都报告 `KeyPairNotFound`，绝不返回孤立的半边。
    pub fn get_key_pair(&self, tag: &str) -> Result<RsaKeyPair<E>, Error> {
        let (public_tag, private_tag) = derived_tags(tag);

        let public_der = self.store.get(&KeyQuery::rsa_key(&public_tag))?;
        let private_der = self.store.get(&KeyQuery::rsa_key(&private_tag))?;

        match (public_der, private_der) {
            (Some(public_der), Some(private_der)) => {
                let public_key = E::import_public_der(&public_der)?;
                let private_key = E::import_private_der(&private_der)?;
                Ok(RsaKeyPair::new(
                    public_key,
                    private_key,
                    Some(tag.to_string()),
                ))
            }
            _ => Err(Error::KeyPairNotFound(tag.to_string())),
        }
    }

    /// 删除标识符下的两半。
    ///
    /// 幂等：半边或整对缺失都不算错误。
    pub fn delete_key_pair(&self, tag: &str) -> Result<(), Error> {
        let (public_tag, private_tag) = derived_tags(tag);

        self.store.delete(&KeyQuery::rsa_key(&public_tag))?;
        self.store.delete(&KeyQuery::rsa_key(&private_tag))?;
        debug!(tag, "deleted key pair");
        Ok(())
    }
}
