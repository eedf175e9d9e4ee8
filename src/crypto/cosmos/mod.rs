//! Cosmos SDK Wallet Module
//!
//! Secret Network 지갑을 위한 암호화 유틸리티를 제공합니다.
//!
//! # 주요 기능
//!
//! - BIP-39 니모닉 / BIP-32/44 HD 키 파생
//! - Bech32 주소 인코딩/디코딩
//! - Amino JSON query permit 서명
//! - Protobuf 트랜잭션 인코딩 (SIGN_MODE_DIRECT)
//! - secp256k1 ECDSA 서명 및 TxRaw 조립
//! - 컨트랙트 메시지 AES-256-GCM 암호화
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use secret_wallet_core::crypto::cosmos::{CosmosWallet, SecretPhrase, SECRET_MAINNET};
//!
//! let wallet = CosmosWallet::from_mnemonic(&SecretPhrase::new(words), &SECRET_MAINNET)?;
//! println!("Address: {}", wallet.address());
//!
//! let permit = wallet.sign_permit("balance-permit", vec![token_address], vec!["balance".into()])?;
//! let query = permit.to_query_json()?;
//! ```

mod address;
pub mod bech32;
pub mod cipher;
mod keys;
pub mod permit;
pub mod protobuf;
mod signer;
pub mod transaction;
mod wallet;

pub use address::{
    address_to_canonical, private_key_to_address, public_key_to_address, public_key_to_canonical,
    validate_address, ChainConfig, CANONICAL_ADDRESS_LEN, LOCALSECRET, SECRET_MAINNET,
    SECRET_TESTNET,
};
pub use cipher::{ContractMessageCipher, KeyAgreement, PreDerivedKey, X25519KeyAgreement};
pub use keys::{
    derive_key, derive_private_key_from_seed, generate_mnemonic, mnemonic_to_seed,
    parse_private_key, private_key_to_public_key, validate_mnemonic, CosmosKeyPair, SecretPhrase,
    DEFAULT_DERIVATION_PATH,
};
pub use permit::{build_permit_sign_doc, sign_permit, verify_permit, Permit, PermitParams};
pub use signer::{
    assemble_tx_raw, der_to_raw, sign_bytes, sign_hash, validate_sender_matches,
    verify_hash_signature, verify_signature, CosmosSignature,
};
pub use wallet::{CosmosWallet, ExecuteRequest, SignedTx};

// Re-export commonly used transaction types at the module level
pub use transaction::{
    CosmosAny, CosmosAuthInfo, CosmosCoin, CosmosFee, CosmosModeInfo, CosmosPubKey, CosmosSignDoc,
    CosmosSignerInfo, CosmosTxBody, CosmosTxRaw, ExecuteTxBuilder, MsgExecuteContract, SignMode,
    UnsignedExecuteTx,
};
