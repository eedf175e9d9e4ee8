//! Signing Benchmarks
//!
//! Benchmarks for key derivation, permit signing, tx encoding and message encryption

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use secret_wallet_core::crypto::cosmos::{
    bech32, derive_key, sign_bytes, sign_permit, ContractMessageCipher, CosmosCoin, CosmosFee,
    ExecuteTxBuilder, MsgExecuteContract, PermitParams, PreDerivedKey, SecretPhrase,
    X25519KeyAgreement, DEFAULT_DERIVATION_PATH,
};

const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn bench_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("keys");
    let phrase = SecretPhrase::new(TEST_MNEMONIC);

    group.bench_function("derive_key", |b| {
        b.iter(|| black_box(derive_key(&phrase, DEFAULT_DERIVATION_PATH).unwrap()))
    });

    let data: Vec<u8> = (0u8..20).collect();
    group.bench_function("bech32_encode", |b| {
        b.iter(|| black_box(bech32::encode("secret", &data).unwrap()))
    });

    let encoded = bech32::encode("secret", &data).unwrap();
    group.bench_function("bech32_decode", |b| {
        b.iter(|| black_box(bech32::decode(&encoded).unwrap()))
    });

    group.finish();
}

fn bench_signing(c: &mut Criterion) {
    let mut group = c.benchmark_group("signing");
    let keypair = derive_key(&SecretPhrase::new(TEST_MNEMONIC), DEFAULT_DERIVATION_PATH).unwrap();

    group.bench_function("sign_bytes_256", |b| {
        let data = [7u8; 256];
        b.iter(|| black_box(sign_bytes(&keypair.private_key, &data).unwrap()))
    });

    let params = PermitParams::new(
        "secret-4",
        "bench",
        vec!["secret1k0jntykt7e4g3y88ltc60czgjuqdy4c9e8fzek".into()],
        vec!["balance".into()],
    );
    group.bench_function("sign_permit", |b| {
        b.iter(|| black_box(sign_permit(&params, &keypair).unwrap()))
    });

    group.finish();
}

fn bench_tx_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("tx_encoding");
    let sender = bech32::encode("secret", &[1u8; 20]).unwrap();
    let contract = bech32::encode("secret", &[2u8; 20]).unwrap();

    for size in [64usize, 512, 4096] {
        group.bench_with_input(BenchmarkId::new("sign_doc", size), &size, |b, &size| {
            b.iter(|| {
                let msg = MsgExecuteContract::new(&sender, &contract, vec![0u8; size], "secret").unwrap();
                let fee = CosmosFee::new(vec![CosmosCoin::new("uscrt", "20000")], 200_000);
                let unsigned = ExecuteTxBuilder::new("secret-4", 1, 1, &[2u8; 33], fee)
                    .message(msg)
                    .build()
                    .unwrap();
                black_box(unsigned.sign_doc_bytes())
            })
        });
    }

    group.finish();
}

fn bench_encryption(c: &mut Criterion) {
    let mut group = c.benchmark_group("encryption");
    let plaintext = vec![b'a'; 512];

    let pre_derived = PreDerivedKey::new([7u8; 32], [9u8; 32]);
    group.bench_function("aes_gcm_512", |b| {
        b.iter(|| black_box(ContractMessageCipher::encrypt(&plaintext, &pre_derived).unwrap()))
    });

    let x25519 = X25519KeyAgreement::new([1u8; 32], [0x55; 32]);
    group.bench_function("x25519_hkdf_aes_gcm_512", |b| {
        b.iter(|| black_box(ContractMessageCipher::encrypt(&plaintext, &x25519).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_keys, bench_signing, bench_tx_encoding, bench_encryption);
criterion_main!(benches);
