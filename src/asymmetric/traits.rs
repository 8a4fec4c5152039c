//! 定义了 RSA 单块加密引擎的核心 Trait。
use crate::common::config::KeySize;
use crate::common::utils::ZeroizingVec;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// `RsaBlockCipher` 定义了 RSA 原语引擎必须实现的核心能力。
///
/// 引擎只负责正确的 RSA/PKCS#1 数学运算：生成密钥对、查询块尺寸、
/// 加解密单个数据块，以及密钥句柄的 DER/PEM 导入导出。
/// 命名约定、持久化与协议语义由上层（`RsaKeyPair` 与 `KeyPairManager`）负责。
pub trait RsaBlockCipher: Sized {
    /// 公钥句柄类型
    type PublicKey: Clone + Serialize + for<'de> Deserialize<'de> + Debug;

    /// 私钥句柄类型
    type PrivateKey: Clone + Serialize + for<'de> Deserialize<'de> + Debug;

    /// 错误类型
    type Error: std::error::Error + Send + Sync + 'static;

    /// 以给定位数生成密钥对
    fn generate_keypair(
        size: KeySize,
    ) -> Result<(Self::PublicKey, Self::PrivateKey), Self::Error>;

    /// 公钥的块尺寸（字节），由模数长度决定
    fn public_block_size(public_key: &Self::PublicKey) -> Result<usize, Self::Error>;

    /// 私钥的块尺寸（字节），由模数长度决定
    fn private_block_size(private_key: &Self::PrivateKey) -> Result<usize, Self::Error>;

    /// 使用公钥以 PKCS#1 v1.5 填充加密单个数据块，输出恰好一个块。
    fn encrypt_block(
        public_key: &Self::PublicKey,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, Self::Error>;

    /// 使用私钥以 PKCS#1 v1.5 填充解密单个数据块，返回去填充后的明文。
    fn decrypt_block(
        private_key: &Self::PrivateKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, Self::Error>;

    /// 将公钥导出为 DER 字节（SubjectPublicKeyInfo）
    fn export_public_der(public_key: &Self::PublicKey) -> Result<Vec<u8>, Self::Error>;

    /// 将私钥导出为 DER 字节（PKCS#8）
    fn export_private_der(private_key: &Self::PrivateKey) -> Result<ZeroizingVec, Self::Error>;

    /// 从 DER 字节导入公钥
    fn import_public_der(der: &[u8]) -> Result<Self::PublicKey, Self::Error>;

    /// 从 DER 字节导入私钥
    fn import_private_der(der: &[u8]) -> Result<Self::PrivateKey, Self::Error>;

    /// 将公钥导出为标准 PEM 格式
    fn export_public_key(public_key: &Self::PublicKey) -> Result<String, Self::Error>;

    /// 将私钥导出为标准 PEM 格式
    fn export_private_key(private_key: &Self::PrivateKey) -> Result<String, Self::Error>;

    /// 从标准 PEM 格式导入公钥
    fn import_public_key(key_data: &str) -> Result<Self::PublicKey, Self::Error>;

    /// 从标准 PEM 格式导入私钥
    fn import_private_key(key_data: &str) -> Result<Self::PrivateKey, Self::Error>;
}
