//! Common wallet traits
//!
//! 서명자와 외부 비밀 저장소의 공통 인터페이스를 정의합니다.

use crate::crypto::cosmos::{CosmosSignature, SecretPhrase};
use crate::errors::WalletResult;
use serde::{Deserialize, Serialize};

/// 서명자 트레이트
pub trait Signer {
    /// Bech32 주소
    fn address(&self) -> &str;

    /// 압축 공개키 (33 bytes)
    fn public_key(&self) -> &[u8; 33];

    /// SHA-256 해시 후 서명
    fn sign_bytes(&self, data: &[u8]) -> WalletResult<CosmosSignature>;
}

/// 저장소 안의 지갑 식별자
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletId(String);

impl WalletId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WalletId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 외부 비밀 저장소
///
/// 니모닉 보관, PIN 확인, 선택된 지갑 기억은 호출자 쪽 구현이 담당합니다.
/// 이 크레이트는 구현체를 제공하지 않으며, 실패는 `SecretStore` 에러로
/// 보고해야 합니다.
pub trait SecretStore {
    /// 지갑 니모닉 조회
    fn get(&self, id: &WalletId) -> WalletResult<SecretPhrase>;

    /// 저장된 지갑 목록
    fn list(&self) -> WalletResult<Vec<WalletId>>;

    /// 선택된 지갑 변경
    fn set_selected(&mut self, id: &WalletId) -> WalletResult<()>;

    /// 선택된 지갑
    fn selected(&self) -> WalletResult<Option<WalletId>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_id_display() {
        let id = WalletId::new("main");
        assert_eq!(id.to_string(), "main");
        assert_eq!(id.as_str(), "main");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"main\"");
    }
}
