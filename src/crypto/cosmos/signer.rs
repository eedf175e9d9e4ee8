//! Transaction Signing
//!
//! SIGN_MODE_DIRECT 서명과 서명 포맷 변환을 담당합니다.
//!
//! # 서명 방식
//!
//! - 메시지를 SHA-256으로 한 번 해시
//! - 해시를 secp256k1 ECDSA (RFC 6979)로 서명
//! - 서명은 DER가 아닌 raw 64바이트 (r || s, 각 32바이트 big-endian, low-S)
//!
//! # 참조
//!
//! - [Cosmos SDK Signing](https://docs.cosmos.network/main/core/encoding)

use super::address::{public_key_to_address, public_key_to_canonical, validate_address};
use super::keys::CosmosKeyPair;
use super::transaction::CosmosTxRaw;
use crate::errors::{WalletError, WalletResult};
use k256::ecdsa::{
    signature::hazmat::{PrehashSigner, PrehashVerifier},
    Signature as K256Signature, SigningKey, VerifyingKey,
};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

/// ECDSA 서명 (r, s)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CosmosSignature {
    /// r 값 (32 bytes)
    pub r: [u8; 32],
    /// s 값 (32 bytes)
    pub s: [u8; 32],
}

impl CosmosSignature {
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Self { r, s }
    }

    /// 64바이트 형식으로 변환 (r || s)
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..].copy_from_slice(&self.s);
        bytes
    }

    /// 64바이트에서 파싱
    pub fn from_bytes(bytes: &[u8]) -> WalletResult<Self> {
        if bytes.len() != 64 {
            return Err(signature_err(format!("Expected 64 bytes, got {}", bytes.len())));
        }

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        Ok(Self { r, s })
    }

    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(self.to_bytes())
    }

    pub fn from_base64(encoded: &str) -> WalletResult<Self> {
        use base64::Engine;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| signature_err(format!("Invalid base64: {e}")))?;
        Self::from_bytes(&bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_hex(hex_str: &str) -> WalletResult<Self> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str).map_err(|e| signature_err(format!("Invalid hex: {e}")))?;
        Self::from_bytes(&bytes)
    }

    fn to_k256(&self) -> WalletResult<K256Signature> {
        K256Signature::from_slice(&self.to_bytes())
            .map_err(|e| signature_err(format!("Invalid signature format: {e}")))
    }
}

/// 바이트 데이터 서명 (SHA-256 해시 후 서명)
pub fn sign_bytes(private_key: &[u8; 32], data: &[u8]) -> WalletResult<CosmosSignature> {
    let hash: [u8; 32] = Sha256::digest(data).into();
    sign_hash(private_key, &hash)
}

/// 32바이트 해시 직접 서명 (추가 해싱 없음)
pub fn sign_hash(private_key: &[u8; 32], hash: &[u8; 32]) -> WalletResult<CosmosSignature> {
    let signing_key = SigningKey::from_bytes(private_key.into())
        .map_err(|e| signature_err(format!("Invalid private key: {e}")))?;

    let signature: K256Signature = signing_key
        .sign_prehash(hash)
        .map_err(|e| signature_err(format!("ECDSA signing failed: {e}")))?;
    let signature = signature.normalize_s().unwrap_or(signature);

    let bytes = signature.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);

    Ok(CosmosSignature::new(r, s))
}

/// 서명 검증 (데이터를 SHA-256으로 해시한 뒤 검증)
pub fn verify_signature(
    public_key: &[u8; 33],
    data: &[u8],
    signature: &CosmosSignature,
) -> WalletResult<bool> {
    let hash: [u8; 32] = Sha256::digest(data).into();
    verify_hash_signature(public_key, &hash, signature)
}

/// 해시에 대한 서명 검증
pub fn verify_hash_signature(
    public_key: &[u8; 33],
    hash: &[u8; 32],
    signature: &CosmosSignature,
) -> WalletResult<bool> {
    let verifying_key = VerifyingKey::from_sec1_bytes(public_key)
        .map_err(|e| signature_err(format!("Invalid public key: {e}")))?;
    let k256_sig = signature.to_k256()?;

    Ok(verifying_key.verify_prehash(hash, &k256_sig).is_ok())
}

/// DER 인코딩된 ECDSA 서명을 raw 64바이트 (r || s)로 변환
///
/// ```text
/// 0x30 <len> 0x02 <rlen> <r> 0x02 <slen> <s>
/// ```
///
/// 엄격한 DER만 받습니다. 음수/0 성분, 비최소 인코딩, 32바이트를 넘는
/// 성분은 `Signature` 에러입니다. 짧은 성분은 32바이트로 왼쪽 0-패딩됩니다.
pub fn der_to_raw(der: &[u8]) -> WalletResult<[u8; 64]> {
    let sig = K256Signature::from_der(der)
        .map_err(|e| signature_err(format!("Invalid DER signature: {e}")))?;

    let mut raw = [0u8; 64];
    raw.copy_from_slice(&sig.to_bytes());
    Ok(raw)
}

/// 서명 전 발신자 주소 확인
///
/// 요청에 적힌 sender를 디코딩해 서명 키의 canonical 주소와 비교합니다.
/// 다르거나 디코딩할 수 없으면 `AddressMismatch`를 반환하며, 이 경우
/// 어떤 서명도 만들지 않습니다. 대소문자 표기는 구분하지 않습니다.
pub fn validate_sender_matches(
    claimed: &str,
    keypair: &CosmosKeyPair,
    prefix: &str,
) -> WalletResult<()> {
    let expected = public_key_to_canonical(&keypair.public_key);
    let matches = validate_address(claimed, Some(prefix))
        .map(|canonical| canonical == expected)
        .unwrap_or(false);

    if !matches {
        let derived = public_key_to_address(&keypair.public_key, prefix)?;
        warn!(claimed, derived = %derived, "sender does not match signing key");
        return Err(WalletError::AddressMismatch {
            claimed: claimed.to_string(),
            derived,
        });
    }
    Ok(())
}

/// TxRaw 조립 (body, auth_info, 단일 서명)
pub fn assemble_tx_raw(
    body_bytes: &[u8],
    auth_info_bytes: &[u8],
    signature: &CosmosSignature,
) -> Vec<u8> {
    let tx = CosmosTxRaw::new(
        body_bytes.to_vec(),
        auth_info_bytes.to_vec(),
        vec![signature.to_bytes().to_vec()],
    )
    .encode();
    debug!(tx_len = tx.len(), "assembled TxRaw");
    tx
}

fn signature_err(message: impl Into<String>) -> WalletError {
    WalletError::Signature {
        message: message.into(),
    }
}
