//! `RsaCryptoSystem` 提供了基于 RSA PKCS#1 v1.5 的单块加解密原语。
//! 在 `pair-kit` 框架中，它是 `RsaBlockCipher` 能力的默认实现。

use crate::asymmetric::traits::RsaBlockCipher;
use crate::common::config::KeySize;
use crate::common::utils::ZeroizingVec;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::rand_core::OsRng as RsaOsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RSA 单块加密系统可能产生的错误
#[derive(Error, Debug)]
pub enum RsaSystemError {
    #[error("Key generation error: {0}")]
    KeyGeneration(String),
    #[error("Key codec error: {0}")]
    KeyCodec(String),
    #[error("Encrypt error: {0}")]
    Encrypt(String),
    #[error("Decrypt error: {0}")]
    Decrypt(String),
}

/// RSA公钥包装器（SubjectPublicKeyInfo DER 编码），提供序列化支持
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsaPublicKeyWrapper(pub Vec<u8>);

impl RsaPublicKeyWrapper {
    /// 获取内部DER编码的公钥数据
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// RSA私钥包装器（PKCS#8 DER 编码），提供序列化和安全擦除支持
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsaPrivateKeyWrapper(pub ZeroizingVec);

impl RsaPrivateKeyWrapper {
    /// 获取内部DER编码的私钥数据
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// RSA加密系统实现
///
/// 提供标准RSA PKCS#1 v1.5单块加密和解密功能
pub struct RsaCryptoSystem;

impl RsaCryptoSystem {
    fn decode_public(public_key: &RsaPublicKeyWrapper) -> Result<RsaPublicKey, RsaSystemError> {
        RsaPublicKey::from_public_key_der(&public_key.0)
            .map_err(|e| RsaSystemError::KeyCodec(format!("解析RSA公钥失败: {}", e)))
    }

    fn decode_private(
        private_key: &RsaPrivateKeyWrapper,
    ) -> Result<RsaPrivateKey, RsaSystemError> {
        RsaPrivateKey::from_pkcs8_der(&private_key.0)
            .map_err(|e| RsaSystemError::KeyCodec(format!("解析RSA私钥失败: {}", e)))
    }
}

impl RsaBlockCipher for RsaCryptoSystem {
    type PublicKey = RsaPublicKeyWrapper;
    type PrivateKey = RsaPrivateKeyWrapper;
    type Error = RsaSystemError;

    fn generate_keypair(
        size: KeySize,
    ) -> Result<(Self::PublicKey, Self::PrivateKey), Self::Error> {
        let mut rsa_rng = RsaOsRng;

        let private_key = RsaPrivateKey::new(&mut rsa_rng, size.bits())
            .map_err(|e| RsaSystemError::KeyGeneration(format!("生成RSA密钥失败: {}", e)))?;
        let public_key = RsaPublicKey::from(&private_key);

        // 将密钥转换为DER格式，然后包装
        let public_der = public_key
            .to_public_key_der()
            .map_err(|e| RsaSystemError::KeyCodec(format!("导出RSA公钥DER失败: {}", e)))?;

        let private_der = private_key
            .to_pkcs8_der()
            .map_err(|e| RsaSystemError::KeyCodec(format!("导出RSA私钥DER失败: {}", e)))?;

        Ok((
            RsaPublicKeyWrapper(public_der.as_bytes().to_vec()),
            RsaPrivateKeyWrapper(ZeroizingVec(private_der.as_bytes().to_vec())),
        ))
    }

    fn public_block_size(public_key: &Self::PublicKey) -> Result<usize, Self::Error> {
        Ok(Self::decode_public(public_key)?.size())
    }

    fn private_block_size(private_key: &Self::PrivateKey) -> Result<usize, Self::Error> {
        Ok(Self::decode_private(private_key)?.size())
    }

    fn encrypt_block(
        public_key: &Self::PublicKey,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, Self::Error> {
        let public_key = Self::decode_public(public_key)?;

        let mut rng = RsaOsRng;
        public_key
            .encrypt(&mut rng, Pkcs1v15Encrypt, plaintext)
            .map_err(|e| RsaSystemError::Encrypt(format!("RSA加密失败: {}", e)))
    }

    fn decrypt_block(
        private_key: &Self::PrivateKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, Self::Error> {
        let private_key = Self::decode_private(private_key)?;

        // PKCS#1 v1.5 去填充后返回实际明文，长度可能小于块尺寸
        private_key
            .decrypt(Pkcs1v15Encrypt, ciphertext)
            .map_err(|e| RsaSystemError::Decrypt(format!("RSA解密失败: {}", e)))
    }

    fn export_public_der(public_key: &Self::PublicKey) -> Result<Vec<u8>, Self::Error> {
        Ok(public_key.0.clone())
    }

    fn export_private_der(private_key: &Self::PrivateKey) -> Result<ZeroizingVec, Self::Error> {
        Ok(private_key.0.clone())
    }

    fn import_public_der(der: &[u8]) -> Result<Self::PublicKey, Self::Error> {
        // 先解析以验证DER结构，再按原始字节包装
        RsaPublicKey::from_public_key_der(der)
            .map_err(|e| RsaSystemError::KeyCodec(format!("导入RSA公钥DER失败: {}", e)))?;

        Ok(RsaPublicKeyWrapper(der.to_vec()))
    }

    fn import_private_der(der: &[u8]) -> Result<Self::PrivateKey, Self::Error> {
        RsaPrivateKey::from_pkcs8_der(der)
            .map_err(|e| RsaSystemError::KeyCodec(format!("导入RSA私钥DER失败: {}", e)))?;

        Ok(RsaPrivateKeyWrapper(ZeroizingVec(der.to_vec())))
    }

    fn export_public_key(public_key: &Self::PublicKey) -> Result<String, Self::Error> {
        let public_key = Self::decode_public(public_key)?;

        public_key
            .to_public_key_pem(rsa::pkcs8::LineEnding::LF)
            .map_err(|e| RsaSystemError::KeyCodec(format!("RSA公钥导出失败: {}", e)))
    }

    fn export_private_key(private_key: &Self::PrivateKey) -> Result<String, Self::Error> {
        let private_key = Self::decode_private(private_key)?;

        let pem = private_key
            .to_pkcs8_pem(rsa::pkcs8::LineEnding::LF)
            .map_err(|e| RsaSystemError::KeyCodec(format!("RSA私钥导出失败: {}", e)))?
            .to_string();
        Ok(pem)
    }

    fn import_public_key(key_data: &str) -> Result<Self::PublicKey, Self::Error> {
        let public_key = RsaPublicKey::from_public_key_pem(key_data)
            .map_err(|e| RsaSystemError::KeyCodec(format!("导入RSA公钥失败: {}", e)))?;

        let public_der = public_key
            .to_public_key_der()
            .map_err(|e| RsaSystemError::KeyCodec(format!("导出RSA公钥DER失败: {}", e)))?;

        Ok(RsaPublicKeyWrapper(public_der.as_bytes().to_vec()))
    }

    fn import_private_key(key_data: &str) -> Result<Self::PrivateKey, Self::Error> {
        let private_key = RsaPrivateKey::from_pkcs8_pem(key_data)
            .map_err(|e| RsaSystemError::KeyCodec(format!("导入RSA私钥失败: {}", e)))?;

        let private_der = private_key
            .to_pkcs8_der()
            .map_err(|e| RsaSystemError::KeyCodec(format!("导出RSA私钥DER失败: {}", e)))?;

        Ok(RsaPrivateKeyWrapper(ZeroizingVec(
            private_der.as_bytes().to_vec(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to get a valid key pair for tests
    fn setup_keys() -> (RsaPublicKeyWrapper, RsaPrivateKeyWrapper) {
        RsaCryptoSystem::generate_keypair(KeySize::Rsa1024).unwrap()
    }

    #[test]
    fn test_rsa_encryption_roundtrip() {
        let (public_key, private_key) = setup_keys();
        let plaintext = b"some secret data";

        let ciphertext = RsaCryptoSystem::encrypt_block(&public_key, plaintext).unwrap();
        let decrypted = RsaCryptoSystem::decrypt_block(&private_key, &ciphertext).unwrap();

        assert_eq!(plaintext, decrypted.as_slice());
    }

    #[test]
    fn test_block_sizes_match_key_size() {
        for size in [KeySize::Rsa512, KeySize::Rsa1024] {
            let (public_key, private_key) = RsaCryptoSystem::generate_keypair(size).unwrap();

            assert_eq!(
                RsaCryptoSystem::public_block_size(&public_key).unwrap(),
                size.block_size()
            );
            assert_eq!(
                RsaCryptoSystem::private_block_size(&private_key).unwrap(),
                size.block_size()
            );
        }
    }

    #[test]
    fn test_ciphertext_is_exactly_one_block() {
        let (public_key, _) = setup_keys();

        let ciphertext = RsaCryptoSystem::encrypt_block(&public_key, b"hello").unwrap();
        assert_eq!(ciphertext.len(), KeySize::Rsa1024.block_size());
    }

    #[test]
    fn test_rsa_decrypt_wrong_key_fails() {
        let (public_key, _) = setup_keys();
        let (_, wrong_private_key) = setup_keys();
        let plaintext = b"some secret data";

        let ciphertext = RsaCryptoSystem::encrypt_block(&public_key, plaintext).unwrap();
        let result = RsaCryptoSystem::decrypt_block(&wrong_private_key, &ciphertext);

        assert!(result.is_err());
    }

    #[test]
    fn test_rsa_decrypt_tampered_ciphertext_fails() {
        let (public_key, private_key) = setup_keys();
        let plaintext = b"some original text";

        let mut ciphertext = RsaCryptoSystem::encrypt_block(&public_key, plaintext).unwrap();
        // Tamper with the ciphertext
        ciphertext[0] ^= 0xff;

        let result = RsaCryptoSystem::decrypt_block(&private_key, &ciphertext);
        assert!(result.is_err());
    }

    #[test]
    fn test_encrypt_data_too_long_fails() {
        let (public_key, _) = setup_keys();
        // PKCS#1 v1.5 的可用载荷上限是块尺寸减 11 字节
        let long_data = vec![0u8; KeySize::Rsa1024.block_size()];

        let result = RsaCryptoSystem::encrypt_block(&public_key, &long_data);
        assert!(result.is_err());
    }

    #[test]
    fn test_rsa_key_export_import_pem() {
        let (public_key, private_key) = setup_keys();

        let exported_pub = RsaCryptoSystem::export_public_key(&public_key).unwrap();
        let exported_priv = RsaCryptoSystem::export_private_key(&private_key).unwrap();

        let imported_pub = RsaCryptoSystem::import_public_key(&exported_pub).unwrap();
        let imported_priv = RsaCryptoSystem::import_private_key(&exported_priv).unwrap();

        assert_eq!(public_key, imported_pub);
        assert_eq!(private_key, imported_priv);
    }

    #[test]
    fn test_rsa_key_export_import_der() {
        let (public_key, private_key) = setup_keys();

        let pub_der = RsaCryptoSystem::export_public_der(&public_key).unwrap();
        let priv_der = RsaCryptoSystem::export_private_der(&private_key).unwrap();

        let imported_pub = RsaCryptoSystem::import_public_der(&pub_der).unwrap();
        let imported_priv = RsaCryptoSystem::import_private_der(&priv_der).unwrap();

        assert_eq!(public_key, imported_pub);
        assert_eq!(private_key, imported_priv);
    }

    #[test]
    fn test_rsa_import_invalid_key_fails() {
        let invalid_pem = "not-a-valid-pem";
        assert!(RsaCryptoSystem::import_public_key(invalid_pem).is_err());
        assert!(RsaCryptoSystem::import_private_key(invalid_pem).is_err());

        let invalid_der = [0u8; 16];
        assert!(RsaCryptoSystem::import_public_der(&invalid_der).is_err());
        assert!(RsaCryptoSystem::import_private_der(&invalid_der).is_err());
    }

    #[test]
    fn test_encrypt_empty_data() {
        let (public_key, private_key) = setup_keys();
        let plaintext = b"";

        let ciphertext = RsaCryptoSystem::encrypt_block(&public_key, plaintext).unwrap();
        let decrypted = RsaCryptoSystem::decrypt_block(&private_key, &ciphertext).unwrap();

        assert_eq!(plaintext, decrypted.as_slice());
    }
}
