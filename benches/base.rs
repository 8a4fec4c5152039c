use criterion::{Criterion, criterion_group, criterion_main};
use pair_kit::{KeySize, MemoryKeyStore, RsaKeyPairManager};
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let manager = RsaKeyPairManager::new(MemoryKeyStore::new());

    c.bench_function("generate 1024-bit transient pair", |b| {
        b.iter(|| manager.generate(black_box(KeySize::Rsa1024), None).unwrap());
    });
}

fn bench_block_roundtrip(c: &mut Criterion) {
    let manager = RsaKeyPairManager::new(MemoryKeyStore::new());
    let pair = manager.generate(KeySize::Rsa2048, None).unwrap();
    let plaintext = "x".repeat(96);

    c.bench_function("encrypt 96B (2048-bit)", |b| {
        b.iter(|| pair.encrypt(black_box(&plaintext)).unwrap());
    });

    let ciphertext = pair.encrypt(&plaintext).unwrap();
    c.bench_function("decrypt 96B (2048-bit)", |b| {
        b.iter(|| pair.decrypt(black_box(&ciphertext)).unwrap());
    });
}

fn bench_store_resolution(c: &mut Criterion) {
    let manager = RsaKeyPairManager::new(MemoryKeyStore::new());
    manager
        .generate(KeySize::Rsa2048, Some("bench.pair"))
        .unwrap();

    c.bench_function("get_key_pair from memory store", |b| {
        b.iter(|| manager.get_key_pair(black_box("bench.pair")).unwrap());
    });
}

criterion_group!(
    benches,
    bench_generate,
    bench_block_roundtrip,
    bench_store_resolution
);
criterion_main!(benches);
