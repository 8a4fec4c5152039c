//! An encrypted container for password-protected key storage.

use aes_gcm::aead::{Aead, AeadCore, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use base64::{Engine as _, engine::general_purpose};
use chrono::Utc;
use rsa::rand_core::{OsRng, RngCore};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroize;

use crate::common::utils::ZeroizingVec;

/// Errors produced while sealing or opening an `EncryptedKeyContainer`.
#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed: {0}")]
    Decryption(String),

    #[error("Malformed container field: {0}")]
    Format(String),

    #[error("Serialization error (JSON)")]
    Json(#[from] serde_json::Error),
}

const NONCE_LEN: usize = 12;
const SALT_LEN: usize = 16;
const WRAPPING_KEY_LEN: usize = 32;

const CONTAINER_ALGORITHM_ID: &str = "argon2id+aes-256-gcm";

fn default_memory_cost() -> u32 {
    19456 // 19 MiB
}
fn default_time_cost() -> u32 {
    2
}
fn default_parallelism_cost() -> u32 {
    1
}

/// An encrypted container for storing one key half, protected by a
/// user-provided password. It uses Argon2id for key derivation from the
/// password, and AES-256-GCM to encrypt the key material.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EncryptedKeyContainer {
    /// Base64-encoded `nonce || ciphertext` block.
    encrypted_data: String,

    /// Base64-encoded salt used for Argon2 key derivation.
    salt: String,

    /// Algorithm identifier of the sealing scheme (for metadata purposes).
    algorithm_id: String,

    /// Creation timestamp in ISO 8601 format.
    created_at: String,

    /// Argon2 memory cost parameter (in KiB).
    #[serde(default = "default_memory_cost")]
    memory_cost: u32,

    /// Argon2 time cost parameter (number of iterations).
    #[serde(default = "default_time_cost")]
    time_cost: u32,

    /// Argon2 parallelism cost parameter.
    #[serde(default = "default_parallelism_cost")]
    parallelism_cost: u32,
}

impl EncryptedKeyContainer {
    /// Creates a new encrypted key container with default Argon2 parameters.
    pub fn new<K: AsRef<[u8]>>(
        password: &SecretString,
        key_data: K,
    ) -> Result<Self, ContainerError> {
        Self::encrypt_key(
            password,
            key_data,
            default_memory_cost(),
            default_time_cost(),
            default_parallelism_cost(),
        )
    }

    /// Creates a new encrypted key container with custom Argon2 parameters.
    pub fn new_with_params<K: AsRef<[u8]>>(
        password: &SecretString,
        key_data: K,
        memory_cost: u32,
        time_cost: u32,
        parallelism_cost: u32,
    ) -> Result<Self, ContainerError> {
        Self::encrypt_key(password, key_data, memory_cost, time_cost, parallelism_cost)
    }

    /// Decrypts and returns the raw key bytes from the container.
    pub fn get_key(&self, password: &SecretString) -> Result<ZeroizingVec, ContainerError> {
        self.decrypt_key(password)
    }

    /// Creation timestamp in ISO 8601 format.
    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// Serializes the container to a JSON string.
    pub fn to_json(&self) -> Result<String, ContainerError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes a container from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ContainerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Derives the wrapping key from the password with Argon2id.
    fn derive_wrapping_key(
        password: &SecretString,
        salt: &[u8],
        memory_cost: u32,
        time_cost: u32,
        parallelism_cost: u32,
    ) -> Result<[u8; WRAPPING_KEY_LEN], ContainerError> {
        let params = Params::new(
            memory_cost,
            time_cost,
            parallelism_cost,
            Some(WRAPPING_KEY_LEN),
        )
        .map_err(|e| ContainerError::KeyDerivation(format!("Argon2参数非法: {}", e)))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut wrapping_key = [0u8; WRAPPING_KEY_LEN];
        argon2
            .hash_password_into(
                password.expose_secret().as_bytes(),
                salt,
                &mut wrapping_key,
            )
            .map_err(|e| ContainerError::KeyDerivation(format!("派生包裹密钥失败: {}", e)))?;

        Ok(wrapping_key)
    }

    /// The core encryption logic.
    fn encrypt_key<K: AsRef<[u8]>>(
        password: &SecretString,
        key_data: K,
        memory_cost: u32,
        time_cost: u32,
        parallelism_cost: u32,
    ) -> Result<Self, ContainerError> {
        // 1. Fresh random salt, then derive a temporary wrapping key from the password.
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let mut wrapping_key =
            Self::derive_wrapping_key(password, &salt, memory_cost, time_cost, parallelism_cost)?;

        // 2. Seal the key material with AES-256-GCM under a fresh nonce.
        let cipher = Aes256Gcm::new(&wrapping_key.into());
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = cipher
            .encrypt(&nonce, key_data.as_ref())
            .map_err(|e| ContainerError::Encryption(format!("AEAD 加密失败: {}", e)))?;
        wrapping_key.zeroize();

        // 3. Frame as `nonce || ciphertext` so the container stays self-contained.
        let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&ciphertext);

        Ok(Self {
            encrypted_data: general_purpose::STANDARD.encode(&blob),
            salt: general_purpose::STANDARD.encode(salt),
            algorithm_id: CONTAINER_ALGORITHM_ID.to_string(),
            created_at: Utc::now().to_rfc3339(),
            memory_cost,
            time_cost,
            parallelism_cost,
        })
    }

    /// The core decryption logic.
    fn decrypt_key(&self, password: &SecretString) -> Result<ZeroizingVec, ContainerError> {
        // 1. Decode the base64 text fields.
        let blob = general_purpose::STANDARD
            .decode(&self.encrypted_data)
            .map_err(|e| ContainerError::Format(format!("encrypted_data 不是合法base64: {}", e)))?;
        if blob.len() < NONCE_LEN {
            return Err(ContainerError::Format(
                "encrypted_data 比 nonce 还短".to_string(),
            ));
        }
        let salt = general_purpose::STANDARD
            .decode(&self.salt)
            .map_err(|e| ContainerError::Format(format!("salt 不是合法base64: {}", e)))?;

        // 2. Re-derive the wrapping key with the stored cost parameters.
        let mut wrapping_key = Self::derive_wrapping_key(
            password,
            &salt,
            self.memory_cost,
            self.time_cost,
            self.parallelism_cost,
        )?;

        // 3. Open the AEAD seal; a wrong password surfaces here as an
        //    authentication failure.
        let cipher = Aes256Gcm::new(&wrapping_key.into());
        let (nonce, ciphertext) = blob.split_at(NONCE_LEN);
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|e| ContainerError::Decryption(format!("AEAD 解密失败: {}", e)))?;
        wrapping_key.zeroize();

        Ok(ZeroizingVec(plaintext))
    }
}

#[cfg(test)]
mod tests {
    use super::EncryptedKeyContainer;
    use secrecy::SecretString;

    fn password() -> SecretString {
        SecretString::from("correct horse battery staple".to_string())
    }

    #[test]
    fn test_container_roundtrip() {
        let container = EncryptedKeyContainer::new(&password(), b"private key der").unwrap();
        let opened = container.get_key(&password()).unwrap();

        assert_eq!(&*opened, b"private key der");
    }

    #[test]
    fn test_container_wrong_password_fails() {
        let container = EncryptedKeyContainer::new(&password(), b"private key der").unwrap();
        let wrong = SecretString::from("wrong password".to_string());

        assert!(container.get_key(&wrong).is_err());
    }

    #[test]
    fn test_container_json_roundtrip() {
        let container = EncryptedKeyContainer::new(&password(), b"material").unwrap();

        let json = container.to_json().unwrap();
        let parsed = EncryptedKeyContainer::from_json(&json).unwrap();

        assert_eq!(&*parsed.get_key(&password()).unwrap(), b"material");
    }

    #[test]
    fn test_container_custom_params_roundtrip() {
        let container =
            EncryptedKeyContainer::new_with_params(&password(), b"material", 8192, 1, 1).unwrap();

        assert_eq!(&*container.get_key(&password()).unwrap(), b"material");
    }

    #[test]
    fn test_container_tampered_data_fails() {
        let mut container = EncryptedKeyContainer::new(&password(), b"material").unwrap();

        // 篡改密文的最后一个字符
        let mut tampered = container.encrypted_data.clone().into_bytes();
        let last = tampered.len() - 5;
        tampered[last] = if tampered[last] == b'A' { b'B' } else { b'A' };
        container.encrypted_data = String::from_utf8(tampered).unwrap();

        assert!(container.get_key(&password()).is_err());
    }
}
