//! Wallet Cryptography
//!
//! # 모듈 구조
//!
//! - `common`: 공통 트레이트 (Signer, SecretStore)
//! - `cosmos`: Cosmos SDK / Secret Network (BIP-44, Bech32, secp256k1, AES-GCM)

pub mod common;
pub mod cosmos;

// Re-exports: Common
pub use common::{SecretStore, Signer, WalletId};

// Re-exports: Cosmos
pub use cosmos::{
    ChainConfig, ContractMessageCipher, CosmosKeyPair, CosmosSignature, CosmosWallet,
    ExecuteRequest, Permit, SecretPhrase, SignedTx, LOCALSECRET, SECRET_MAINNET, SECRET_TESTNET,
};
