//! RSA 密钥对值对象与单块加解密协议。
//!
//! `RsaKeyPair` 持有一对相互匹配的公私钥句柄，以及一个可选的持久化
//! 标识符。加解密操作只依赖句柄本身，与存储后端完全无关。

use crate::asymmetric::traits::RsaBlockCipher;
use crate::common::errors::Error;
use base64::{Engine as _, engine::general_purpose};

/// 一对相互匹配的 RSA 公私钥句柄。
///
/// 瞬态密钥对（`identifier` 为 `None`）只存在于进程内存中；
/// 持久化密钥对的两半可以随时通过 `KeyPairManager::get_key_pair`
/// 从安全存储中重新解析出来。
pub struct RsaKeyPair<E: RsaBlockCipher> {
    public_key: E::PublicKey,
    private_key: E::PrivateKey,
    identifier: Option<String>,
}

impl<E: RsaBlockCipher> Clone for RsaKeyPair<E> {
    fn clone(&self) -> Self {
        Self {
            public_key: self.public_key.clone(),
            private_key: self.private_key.clone(),
            identifier: self.identifier.clone(),
        }
    }
}

impl<E: RsaBlockCipher> std::fmt::Debug for RsaKeyPair<E> {
    // 不打印密钥材料
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaKeyPair")
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

impl<E> RsaKeyPair<E>
where
    E: RsaBlockCipher,
    Error: From<E::Error>,
{
    /// 由一对已匹配的句柄构造密钥对。
    ///
    /// 调用方需保证两个句柄在数学上匹配；
    /// `KeyPairManager` 的生成与检索路径天然满足这一点。
    pub fn new(
        public_key: E::PublicKey,
        private_key: E::PrivateKey,
        identifier: Option<String>,
    ) -> Self {
        Self {
            public_key,
            private_key,
            identifier,
        }
    }

    /// 公钥句柄
    pub fn public_key(&self) -> &E::PublicKey {
        &self.public_key
    }

    /// 私钥句柄
    pub fn private_key(&self) -> &E::PrivateKey {
        &self.private_key
    }

    /// 持久化标识符；瞬态密钥对返回 `None`
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// 加密一个短字符串，返回标准 base64 文本（无换行）。
    ///
    /// 本协议只支持单块消息：明文的 UTF-8 字节长度不得超过公钥块尺寸 B，
    /// 超出时返回 `Error::PlaintextTooLong`，不做分块或截断。
    /// 注意 PKCS#1 v1.5 的实际可用载荷是 B-11 字节；
    /// 长度落在 (B-11, B] 区间时由引擎拒绝，表现为 `EncryptionFailed`。
    pub fn encrypt(&self, plaintext: &str) -> Result<String, Error> {
        let plain = plaintext.as_bytes();

        // 1. 块尺寸由公钥模数决定
        let block_size = E::public_block_size(&self.public_key)?;
        if plain.len() > block_size {
            return Err(Error::PlaintextTooLong {
                max: block_size,
                actual: plain.len(),
            });
        }

        // 2. 单块加密，输出恰好一个块
        let ciphertext = E::encrypt_block(&self.public_key, plain)
            .map_err(|e| Error::EncryptionFailed(e.to_string()))?;

        // 3. 标准 base64 文本帧
        Ok(general_purpose::STANDARD.encode(&ciphertext))
    }

    /// 解密一段 base64 密文，返回原始字符串。
    ///
    /// 解码后的密文必须恰好等于私钥块尺寸 B——RSA 的输出总是
    /// 恰好一个块，任何其他长度都是调用方错误，
    /// 返回 `Error::CiphertextLengthMismatch`。
    pub fn decrypt(&self, ciphertext: &str) -> Result<String, Error> {
        // 1. base64 解码
        let cipher = general_purpose::STANDARD.decode(ciphertext)?;

        // 2. 解码后的密文必须恰好为一个块
        let block_size = E::private_block_size(&self.private_key)?;
        if cipher.len() != block_size {
            return Err(Error::CiphertextLengthMismatch {
                expected: block_size,
                actual: cipher.len(),
            });
        }

        // 3. 单块解密，引擎返回去填充后的实际明文
        let plain = E::decrypt_block(&self.private_key, &cipher)
            .map_err(|e| Error::DecryptionFailed(e.to_string()))?;

        // 4. 明文必须是合法 UTF-8
        Ok(String::from_utf8(plain)?)
    }

    /// 将公钥导出为标准 PEM 格式
    pub fn export_public_key(&self) -> Result<String, Error> {
        Ok(E::export_public_key(&self.public_key)?)
    }

    /// 将私钥导出为标准 PEM 格式
    pub fn export_private_key(&self) -> Result<String, Error> {
        Ok(E::export_private_key(&self.private_key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::RsaKeyPair;
    use crate::asymmetric::rsa::RsaCryptoSystem;
    use crate::asymmetric::traits::RsaBlockCipher;
    use crate::common::config::KeySize;
    use crate::common::errors::Error;
    use base64::{Engine as _, engine::general_purpose};

    fn setup_pair(size: KeySize) -> RsaKeyPair<RsaCryptoSystem> {
        let (public_key, private_key) = RsaCryptoSystem::generate_keypair(size).unwrap();
        RsaKeyPair::new(public_key, private_key, None)
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let pair = setup_pair(KeySize::Rsa1024);

        let ciphertext = pair.encrypt("hello world").unwrap();
        assert_eq!(pair.decrypt(&ciphertext).unwrap(), "hello world");
    }

    #[test]
    fn test_encrypt_produces_one_base64_block() {
        let pair = setup_pair(KeySize::Rsa1024);

        let ciphertext = pair.encrypt("hello world").unwrap();
        let raw = general_purpose::STANDARD.decode(&ciphertext).unwrap();
        assert_eq!(raw.len(), KeySize::Rsa1024.block_size());
    }

    #[test]
    fn test_encrypt_plaintext_too_long() {
        let pair = setup_pair(KeySize::Rsa512);
        let long_plaintext = "x".repeat(KeySize::Rsa512.block_size() + 1);

        let result = pair.encrypt(&long_plaintext);
        assert!(matches!(
            result,
            Err(Error::PlaintextTooLong { max: 64, actual: 65 })
        ));
    }

    #[test]
    fn test_encrypt_between_payload_limit_and_block_size_fails_in_engine() {
        // PKCS#1 v1.5 载荷上限为 B-11：(B-11, B] 区间由引擎拒绝
        let pair = setup_pair(KeySize::Rsa512);
        let plaintext = "x".repeat(KeySize::Rsa512.block_size() - 5);

        let result = pair.encrypt(&plaintext);
        assert!(matches!(result, Err(Error::EncryptionFailed(_))));
    }

    #[test]
    fn test_decrypt_invalid_base64() {
        let pair = setup_pair(KeySize::Rsa512);

        let result = pair.decrypt("not valid base64!!!");
        assert!(matches!(result, Err(Error::InvalidCiphertextEncoding(_))));
    }

    #[test]
    fn test_decrypt_wrong_length_ciphertext() {
        let pair = setup_pair(KeySize::Rsa512);
        let short_block = general_purpose::STANDARD.encode([0u8; 10]);

        let result = pair.decrypt(&short_block);
        assert!(matches!(
            result,
            Err(Error::CiphertextLengthMismatch {
                expected: 64,
                actual: 10
            })
        ));
    }

    #[test]
    fn test_decrypt_garbage_block_fails() {
        let pair = setup_pair(KeySize::Rsa512);
        let garbage = general_purpose::STANDARD.encode([0xAB; 64]);

        let result = pair.decrypt(&garbage);
        assert!(matches!(result, Err(Error::DecryptionFailed(_))));
    }

    #[test]
    fn test_pkcs1_encryption_is_randomized_but_decrypt_is_stable() {
        let pair = setup_pair(KeySize::Rsa1024);

        let first = pair.encrypt("same plaintext").unwrap();
        let second = pair.encrypt("same plaintext").unwrap();
        assert_ne!(first, second);

        assert_eq!(pair.decrypt(&first).unwrap(), "same plaintext");
        assert_eq!(pair.decrypt(&second).unwrap(), "same plaintext");
        // 重复解密同一密文结果稳定
        assert_eq!(pair.decrypt(&first).unwrap(), pair.decrypt(&first).unwrap());
    }

    #[test]
    fn test_debug_does_not_leak_key_material() {
        let pair = setup_pair(KeySize::Rsa512);
        let rendered = format!("{:?}", pair);

        assert!(rendered.contains("identifier"));
        assert!(!rendered.contains("private_key"));
    }
}
