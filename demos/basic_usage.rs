use pair_kit::{KeySize, MemoryKeyStore, RsaKeyPairManager};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manager = RsaKeyPairManager::new(MemoryKeyStore::new());

    // 瞬态密钥对：不接触存储
    let transient = manager.generate(KeySize::Rsa2048, None)?;
    let cipher = transient.encrypt("Hello, Pair-Kit!")?;
    println!("Ciphertext: {}", cipher);
    println!("Decrypted: {}", transient.decrypt(&cipher)?);

    // 持久化密钥对：两半以派生标签写入存储，可随时重新解析
    let durable = manager.generate(KeySize::Rsa1024, Some("com.example.demo"))?;
    println!("Persisted pair: {:?}", durable.identifier());

    let restored = manager.get_key_pair("com.example.demo")?;
    let cipher = restored.encrypt("short message")?;
    println!("Roundtrip via store: {}", restored.decrypt(&cipher)?);

    // 清理演示用密钥
    manager.delete_key_pair("com.example.demo")?;

    Ok(())
}
