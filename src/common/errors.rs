use crate::asymmetric::errors::AsymmetricError;
use crate::asymmetric::rsa::RsaSystemError;
use crate::storage::traits::StorageError;
use thiserror::Error;

/// 密钥管理与加解密操作可能遇到的错误类型
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("Serialization error (JSON)")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported RSA key size: {0} bits")]
    InvalidKeySize(usize),

    #[error("Key generation failed: {0}")]
    GenerationFailed(String),

    #[error("Key pair not found for tag: {0}")]
    KeyPairNotFound(String),

    #[error("A key pair already exists for tag: {0}")]
    KeyAlreadyExists(String),

    #[error("Plaintext too long for key size: max {max} bytes, actual {actual} bytes")]
    PlaintextTooLong { max: usize, actual: usize },

    #[error("Ciphertext length mismatch: expected {expected} bytes, actual {actual} bytes")]
    CiphertextLengthMismatch { expected: usize, actual: usize },

    #[error("Invalid ciphertext encoding")]
    InvalidCiphertextEncoding(#[from] base64::DecodeError),

    #[error("Invalid plaintext encoding")]
    InvalidPlaintextEncoding(#[from] std::string::FromUtf8Error),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Asymmetric cryptographic error")]
    Asymmetric(#[from] AsymmetricError),

    #[error("Secure storage error")]
    Storage(#[from] StorageError),
}

// thiserror 自动处理 Display, StdError 和所有 #[from] 的实现

// 手动实现一些无法通过 #[from] 链式转换的错误
impl From<RsaSystemError> for Error {
    fn from(err: RsaSystemError) -> Self {
        Error::Asymmetric(err.into())
    }
}
