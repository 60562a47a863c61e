use criterion::{black_box, criterion_group, criterion_main, Criterion};

use vanity_pro::hash::keccak::keccak256;
use vanity_pro::hash::pbkdf2::{pbkdf2_hmac_sha512, BIP39_ROUNDS, BIP39_SALT};
use vanity_pro::math::bigint::U256;
use vanity_pro::math::secp256k1::scalar_mul_g;
use vanity_pro::wallet::address::{derive_address, SourceMode};

fn bench_primitives(c: &mut Criterion) {
    c.bench_function("keccak256_64b", |b| {
        let payload = [0x42u8; 64];
        b.iter(|| keccak256(black_box(&payload)))
    });

    c.bench_function("pbkdf2_2048", |b| {
        let phrase = b"abandon abandon abandon abandon abandon abandon abandon abandon \
                       abandon abandon abandon abandon abandon abandon abandon abandon \
                       abandon abandon abandon abandon abandon abandon abandon art";
        b.iter(|| pbkdf2_hmac_sha512(black_box(&phrase[..]), BIP39_SALT, BIP39_ROUNDS))
    });

    c.bench_function("scalar_mul_g", |b| {
        let k = U256::from_be_bytes(&[0x5Au8; 32]);
        b.iter(|| scalar_mul_g(black_box(&k)))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    c.bench_function("derive_address_mnemonic", |b| {
        let entropy = [0x17u8; 32];
        b.iter(|| derive_address(black_box(&entropy), SourceMode::MnemonicEntropy))
    });

    c.bench_function("derive_address_private_key", |b| {
        let entropy = [0x17u8; 32];
        b.iter(|| derive_address(black_box(&entropy), SourceMode::PrivateKey))
    });
}

criterion_group!(benches, bench_primitives, bench_pipeline);
criterion_main!(benches);
