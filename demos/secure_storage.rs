//! 加密文件存储示例

use pair_kit::{EncryptedFileStore, KeySize, RsaKeyPairManager};
use secrecy::SecretString;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store_path = std::env::temp_dir().join("pair-kit-demo.json");
    let password = SecretString::from("mypassword".to_string());

    // 基于口令的加密文件存储：每个密钥半边都封装在加密容器里
    let manager = RsaKeyPairManager::new(EncryptedFileStore::new(&store_path, password));

    if manager.get_key_pair("com.example.sealed").is_err() {
        manager.generate(KeySize::Rsa2048, Some("com.example.sealed"))?;
        println!("Generated and sealed a new pair at {:?}", store_path);
    }

    let pair = manager.get_key_pair("com.example.sealed")?;
    let cipher = pair.encrypt("sealed with a password")?;
    println!("Recovered plaintext: {}", pair.decrypt(&cipher)?);

    // 清理演示用密钥与文件
    manager.delete_key_pair("com.example.sealed")?;
    let _ = std::fs::remove_file(&store_path);

    Ok(())
}
