//! Bech32 Address Derivation
//!
//! 공개키에서 네트워크 주소를 생성합니다.
//!
//! # 주소 형식
//!
//! 1. 공개키 (33 bytes, 압축)
//! 2. SHA-256 해시
//! 3. RIPEMD-160 해시 (20 bytes, canonical address)
//! 4. Bech32 인코딩 (prefix + data)
//!
//! # 예시
//!
//! - Secret: secret1abc...xyz

use super::bech32;
use super::keys::{private_key_to_public_key, DEFAULT_DERIVATION_PATH};
use crate::errors::{WalletError, WalletResult};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Canonical address 길이
pub const CANONICAL_ADDRESS_LEN: usize = 20;

/// 체인 설정
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// 체인 이름
    pub name: &'static str,
    /// Bech32 주소 접두사
    pub address_prefix: &'static str,
    /// 체인 ID
    pub chain_id: &'static str,
    /// 수수료 기본 단위
    pub fee_denom: &'static str,
    /// HD 파생 경로
    pub derivation_path: &'static str,
}

impl ChainConfig {
    /// 새 체인 설정 생성
    pub const fn new(
        name: &'static str,
        address_prefix: &'static str,
        chain_id: &'static str,
        fee_denom: &'static str,
        derivation_path: &'static str,
    ) -> Self {
        Self {
            name,
            address_prefix,
            chain_id,
            fee_denom,
            derivation_path,
        }
    }
}

/// Secret Network 메인넷
pub const SECRET_MAINNET: ChainConfig = ChainConfig::new(
    "Secret Network",
    "secret",
    "secret-4",
    "uscrt",
    DEFAULT_DERIVATION_PATH,
);

/// Secret Network 테스트넷
pub const SECRET_TESTNET: ChainConfig = ChainConfig::new(
    "Secret Network Pulsar",
    "secret",
    "pulsar-3",
    "uscrt",
    DEFAULT_DERIVATION_PATH,
);

/// 로컬 개발 체인
pub const LOCALSECRET: ChainConfig = ChainConfig::new(
    "LocalSecret",
    "secret",
    "secretdev-1",
    "uscrt",
    DEFAULT_DERIVATION_PATH,
);

/// 공개키의 canonical address (RIPEMD-160(SHA-256(pubkey)))
pub fn public_key_to_canonical(public_key: &[u8; 33]) -> [u8; CANONICAL_ADDRESS_LEN] {
    let sha256_hash = Sha256::digest(public_key);
    let ripemd_hash = Ripemd160::digest(sha256_hash);

    let mut out = [0u8; CANONICAL_ADDRESS_LEN];
    out.copy_from_slice(ripemd_hash.as_slice());
    out
}

/// 공개키에서 주소 생성
///
/// # Arguments
///
/// * `public_key` - 33바이트 압축 공개키
/// * `prefix` - Bech32 주소 접두사 (예: "secret")
pub fn public_key_to_address(public_key: &[u8; 33], prefix: &str) -> WalletResult<String> {
    bech32::encode(prefix, &public_key_to_canonical(public_key))
}

/// 개인키에서 주소 생성 (편의 함수)
pub fn private_key_to_address(private_key: &[u8; 32], prefix: &str) -> WalletResult<String> {
    let public_key = private_key_to_public_key(private_key)?;
    public_key_to_address(&public_key, prefix)
}

/// 주소 검증
///
/// 외부에서 받은 수신자/컨트랙트 주소를 검증하고 canonical 바이트를 반환합니다.
///
/// # Arguments
///
/// * `address` - Bech32 주소 문자열
/// * `expected_prefix` - 기대되는 접두사 (None이면 모든 접두사 허용)
pub fn validate_address(
    address: &str,
    expected_prefix: Option<&str>,
) -> WalletResult<[u8; CANONICAL_ADDRESS_LEN]> {
    let (prefix, data) = bech32::decode(address)?;

    if let Some(expected) = expected_prefix {
        if prefix != expected {
            return Err(WalletError::encoding(format!(
                "Expected prefix '{expected}', got '{prefix}'"
            )));
        }
    }

    if data.len() != CANONICAL_ADDRESS_LEN {
        return Err(WalletError::encoding(format!(
            "Expected {CANONICAL_ADDRESS_LEN} bytes address data, got {}",
            data.len()
        )));
    }

    let mut out = [0u8; CANONICAL_ADDRESS_LEN];
    out.copy_from_slice(&data);
    Ok(out)
}

/// Bech32 주소를 canonical 바이트로 변환 (접두사 필수 일치)
pub fn address_to_canonical(
    address: &str,
    prefix: &str,
) -> WalletResult<[u8; CANONICAL_ADDRESS_LEN]> {
    validate_address(address, Some(prefix))
}
