//! # Pair-Kit: RSA Key-Pair Management over a Secure Store
//!
//! `pair-kit` is a key-management and block-cipher façade over an RSA
//! primitive engine and a pluggable secure credential store.
//!
//! It lets a caller generate an RSA key pair at a chosen bit size,
//! optionally persisting both halves under a caller-supplied identifier;
//! retrieve or delete a previously persisted pair by identifier; and
//! encrypt/decrypt short single-block strings with PKCS#1 v1.5 padding
//! and base64 text framing.
//!
//! ## Core Concepts
//!
//! - **[`KeyPairManager`]**: orchestrates generation, persistence,
//!   retrieval and deletion, composing the RSA engine with a store.
//! - **[`RsaKeyPair`]**: the value object wrapping a matched pair of key
//!   handles plus an optional identifier; owns `encrypt`/`decrypt`.
//! - **[`SecureKeyStore`]**: a trait for credential store backends.
//!   `pair-kit` ships an in-memory store, an encrypted file store
//!   (feature `secure-storage`) and an OS credential-service store
//!   (feature `keychain-store`).
//! - **[`RsaBlockCipher`]**: a trait for the RSA primitive engine;
//!   [`RsaCryptoSystem`] is the default `rsa`-crate-backed
//!   implementation.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pair_kit::{KeyPairManager, KeySize, MemoryKeyStore, RsaCryptoSystem};
//!
//! fn main() -> Result<(), pair_kit::Error> {
//!     let manager =
//!         KeyPairManager::<RsaCryptoSystem, _>::new(MemoryKeyStore::new());
//!
//!     // Generate and persist a pair under a tag.
//!     let pair = manager.generate(KeySize::Rsa2048, Some("com.example.app"))?;
//!
//!     // Single-block encryption with base64 framing.
//!     let ciphertext = pair.encrypt("hello world")?;
//!     assert_eq!(pair.decrypt(&ciphertext)?, "hello world");
//!
//!     // The pair can be re-resolved from the store at any time.
//!     let restored = manager.get_key_pair("com.example.app")?;
//!     assert_eq!(restored.decrypt(&ciphertext)?, "hello world");
//!     Ok(())
//! }
//! ```

pub mod asymmetric;
pub mod common;
pub mod manager;
pub mod storage;

// --- Core API re-exports ---
pub use asymmetric::keypair::RsaKeyPair;
pub use asymmetric::rsa::RsaCryptoSystem;
pub use asymmetric::traits::RsaBlockCipher;
pub use common::config::KeySize;
pub use common::errors::Error;
pub use manager::KeyPairManager;
pub use storage::memory::MemoryKeyStore;
pub use storage::query::KeyQuery;
pub use storage::traits::{SecureKeyStore, StorageError};

#[cfg(feature = "secure-storage")]
pub use storage::encrypted_store::EncryptedFileStore;

#[cfg(feature = "keychain-store")]
pub use storage::keychain::KeychainStore;

/// A `KeyPairManager` specialized to the default RSA engine.
pub type RsaKeyPairManager<S> = KeyPairManager<RsaCryptoSystem, S>;

// --- Prelude ---
// A collection of the most commonly used traits, structs, and enums.
pub mod prelude {
    pub use crate::asymmetric::keypair::RsaKeyPair;
    pub use crate::asymmetric::rsa::RsaCryptoSystem;
    pub use crate::asymmetric::traits::RsaBlockCipher;
    pub use crate::common::config::KeySize;
    pub use crate::common::errors::Error;
    pub use crate::manager::KeyPairManager;
    pub use crate::storage::memory::MemoryKeyStore;
    pub use crate::storage::query::KeyQuery;
    pub use crate::storage::traits::{SecureKeyStore, StorageError};

    #[cfg(feature = "secure-storage")]
    pub use crate::storage::encrypted_store::EncryptedFileStore;

    #[cfg(feature = "keychain-store")]
    pub use crate::storage::keychain::KeychainStore;
}

/// The version of the `pair-kit` crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
