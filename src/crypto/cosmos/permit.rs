//! Query Permit (Amino JSON)
//!
//! 트랜잭션 없이 컨트랙트 조회 권한을 위임하는 오프체인 서명 문서입니다.
//!
//! # Sign Doc
//!
//! ```text
//! {"account_number":"0","chain_id":"<chain>","fee":{"amount":[{"amount":"0","denom":"uscrt"}],"gas":"1"},
//!  "memo":"","msgs":[{"type":"query_permit","value":{"allowed_tokens":[..],"permissions":[..],"permit_name":".."}}],
//!  "sequence":"0"}
//! ```
//!
//! - 모든 객체 키는 사전순 정렬, 공백 없음
//! - account_number / sequence / memo / fee 는 프로토콜 상수
//! - 서명은 SHA-256 → secp256k1, raw 64바이트 (r || s)

use super::keys::CosmosKeyPair;
use super::signer::{sign_bytes, verify_signature, CosmosSignature};
use crate::errors::{WalletError, WalletResult};
use crate::utils::time::{ms_to_datetime, now_ms};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;

/// 수수료 단위
pub const PERMIT_FEE_DENOM: &str = "uscrt";
/// Amino 메시지 타입
pub const PERMIT_MSG_TYPE: &str = "query_permit";
/// Amino 공개키 타입
pub const AMINO_PUBKEY_TYPE: &str = "tendermint/PubKeySecp256k1";

const PERMIT_ACCOUNT_NUMBER: &str = "0";
const PERMIT_SEQUENCE: &str = "0";
const PERMIT_MEMO: &str = "";
const PERMIT_FEE_AMOUNT: &str = "0";
const PERMIT_GAS: &str = "1";

/// 서명 대상 permit 필드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermitParams {
    pub chain_id: String,
    pub permit_name: String,
    pub allowed_tokens: Vec<String>,
    pub permissions: Vec<String>,
}

impl PermitParams {
    pub fn new(
        chain_id: impl Into<String>,
        permit_name: impl Into<String>,
        allowed_tokens: Vec<String>,
        permissions: Vec<String>,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            permit_name: permit_name.into(),
            allowed_tokens,
            permissions,
        }
    }

    /// 정렬된 Amino JSON sign doc
    pub fn sign_doc(&self) -> WalletResult<Vec<u8>> {
        build_permit_sign_doc(
            &self.chain_id,
            &self.permit_name,
            &self.allowed_tokens,
            &self.permissions,
        )
    }
}

/// 서명된 permit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permit {
    pub permit_name: String,
    pub allowed_tokens: Vec<String>,
    pub permissions: Vec<String>,
    pub chain_id: String,
    /// Base64 raw 64바이트 서명
    pub signature: String,
    /// Base64 압축 공개키 (33 bytes)
    pub public_key: String,
    /// 서명 시각 (Unix ms)
    pub timestamp: i64,
}

impl Permit {
    /// 구조적 완전성 검사 (암호학적 검증 아님)
    pub fn is_valid(&self) -> bool {
        !self.permit_name.is_empty()
            && !self.allowed_tokens.is_empty()
            && self.allowed_tokens.iter().all(|t| !t.is_empty())
            && !self.permissions.is_empty()
            && self.permissions.iter().all(|p| !p.is_empty())
            && !self.chain_id.is_empty()
            && !self.signature.is_empty()
            && !self.public_key.is_empty()
            && self.timestamp > 0
    }

    /// 서명 시각
    pub fn issued_at(&self) -> DateTime<Utc> {
        ms_to_datetime(self.timestamp)
    }

    /// 서명에 사용된 필드
    pub fn params(&self) -> PermitParams {
        PermitParams::new(
            self.chain_id.clone(),
            self.permit_name.clone(),
            self.allowed_tokens.clone(),
            self.permissions.clone(),
        )
    }

    /// 컨트랙트 `with_permit` 조회에 넣는 JSON 형식
    pub fn to_query_json(&self) -> WalletResult<Value> {
        if !self.is_valid() {
            return Err(WalletError::InvalidPermit {
                message: "permit has empty fields".into(),
            });
        }

        Ok(json!({
            "params": {
                "permit_name": self.permit_name,
                "allowed_tokens": self.allowed_tokens,
                "chain_id": self.chain_id,
                "permissions": self.permissions,
            },
            "signature": {
                "pub_key": {
                    "type": AMINO_PUBKEY_TYPE,
                    "value": self.public_key,
                },
                "signature": self.signature,
            }
        }))
    }
}

/// Amino sign doc 생성 (정렬된 키, 공백 없음)
///
/// 빈 permit 이름, 빈 토큰/권한 목록, 빈 항목은 `Canonicalization` 에러입니다.
pub fn build_permit_sign_doc(
    chain_id: &str,
    permit_name: &str,
    allowed_tokens: &[String],
    permissions: &[String],
) -> WalletResult<Vec<u8>> {
    let value = permit_sign_doc_value(chain_id, permit_name, allowed_tokens, permissions)?;
    let bytes = serde_json::to_vec(&value)?;
    debug!(len = bytes.len(), chain_id, "built permit sign doc");
    Ok(bytes)
}

pub(crate) fn permit_sign_doc_value(
    chain_id: &str,
    permit_name: &str,
    allowed_tokens: &[String],
    permissions: &[String],
) -> WalletResult<Value> {
    let canonical_err = |message: &str| WalletError::Canonicalization {
        message: message.to_string(),
    };
    if chain_id.is_empty() {
        return Err(canonical_err("chain id is empty"));
    }
    if permit_name.is_empty() {
        return Err(canonical_err("permit name is empty"));
    }
    if allowed_tokens.is_empty() || allowed_tokens.iter().any(|t| t.is_empty()) {
        return Err(canonical_err("allowed tokens must be a non-empty list of addresses"));
    }
    if permissions.is_empty() || permissions.iter().any(|p| p.is_empty()) {
        return Err(canonical_err("permissions must be a non-empty list"));
    }

    let doc = json!({
        "account_number": PERMIT_ACCOUNT_NUMBER,
        "chain_id": chain_id,
        "fee": {
            "amount": [{ "amount": PERMIT_FEE_AMOUNT, "denom": PERMIT_FEE_DENOM }],
            "gas": PERMIT_GAS,
        },
        "memo": PERMIT_MEMO,
        "msgs": [{
            "type": PERMIT_MSG_TYPE,
            "value": {
                "allowed_tokens": allowed_tokens,
                "permissions": permissions,
                "permit_name": permit_name,
            }
        }],
        "sequence": PERMIT_SEQUENCE,
    });
    Ok(sort_keys(doc))
}

/// 객체 키를 재귀적으로 사전순 정렬
pub(crate) fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let sorted: Map<String, Value> =
                entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Permit 서명
///
/// sign doc을 다시 만들어 SHA-256 해시 후 서명하고, 공개키와 현재 시각을
/// 묶어 `Permit`을 반환합니다.
pub fn sign_permit(params: &PermitParams, keypair: &CosmosKeyPair) -> WalletResult<Permit> {
    let sign_doc = params.sign_doc()?;
    let signature = sign_bytes(&keypair.private_key, &sign_doc)?;

    let permit = Permit {
        permit_name: params.permit_name.clone(),
        allowed_tokens: params.allowed_tokens.clone(),
        permissions: params.permissions.clone(),
        chain_id: params.chain_id.clone(),
        signature: signature.to_base64(),
        public_key: STANDARD.encode(keypair.public_key),
        timestamp: now_ms(),
    };
    debug!(permit_name = %permit.permit_name, tokens = permit.allowed_tokens.len(), "signed permit");
    Ok(permit)
}

/// Permit 서명 검증
///
/// permit 자신의 필드로 sign doc을 다시 만들어 담긴 공개키로 검증합니다.
pub fn verify_permit(permit: &Permit) -> WalletResult<bool> {
    if !permit.is_valid() {
        return Err(WalletError::InvalidPermit {
            message: "permit has empty fields".into(),
        });
    }

    let public_key = decode_public_key(&permit.public_key)?;
    let signature = CosmosSignature::from_base64(&permit.signature)?;
    let sign_doc = permit.params().sign_doc()?;
    verify_signature(&public_key, &sign_doc, &signature)
}

fn decode_public_key(encoded: &str) -> WalletResult<[u8; 33]> {
    let bytes = STANDARD.decode(encoded).map_err(|e| WalletError::InvalidPermit {
        message: format!("public key is not base64: {e}"),
    })?;
    <[u8; 33]>::try_from(bytes.as_slice()).map_err(|_| WalletError::InvalidPermit {
        message: format!("public key must be 33 bytes, got {}", bytes.len()),
    })
}
