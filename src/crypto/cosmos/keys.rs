//! BIP-39/32/44 HD Key Derivation
//!
//! 니모닉에서 secp256k1 키 쌍을 파생합니다.
//!
//! # BIP-44 경로 규격
//!
//! - Secret Network: m/44'/529'/0'/0/0 (coin_type = 529)
//! - Cosmos 표준: m/44'/118'/0'/0/{index}
//!
//! 경로는 네트워크 상수이며 사용자 설정 대상이 아닙니다.
//!
//! # 비밀 자료 관리
//!
//! 니모닉, 시드, 개인키는 모두 가변 버퍼에 보관되며 drop 시점에
//! `zeroize`로 지워집니다.
//!
//! # 참조
//!
//! - [BIP-32](https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki)
//! - [BIP-39](https://github.com/bitcoin/bips/blob/master/bip-0039.mediawiki)
//! - [SLIP-44](https://github.com/satoshilabs/slips/blob/master/slip-0044.md)

use crate::errors::{WalletError, WalletResult};
use bip32::{DerivationPath, XPrv};
use bip39::Mnemonic;
use k256::ecdsa::SigningKey;
use rand::{rngs::OsRng, RngCore};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// 고정 HD 파생 경로
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/529'/0'/0/0";

/// 12단어 니모닉의 엔트로피 크기 (128 bits)
pub const MNEMONIC_ENTROPY_BYTES: usize = 16;

/// 니모닉 문구
///
/// 불변 문자열 대신 소유된 버퍼에 보관하고 drop 시 0으로 지웁니다.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretPhrase(String);

impl SecretPhrase {
    /// 문구 래핑 (앞뒤 공백 제거)
    pub fn new(phrase: impl Into<String>) -> Self {
        let mut phrase = phrase.into();
        let trimmed = phrase.trim().to_string();
        phrase.zeroize();
        Self(trimmed)
    }

    /// 문구 노출 (호출 범위 안에서만 사용)
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// 단어 수
    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }
}

impl std::fmt::Debug for SecretPhrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SecretPhrase").field(&"[REDACTED]").finish()
    }
}

/// Cosmos 키 쌍
#[derive(Clone)]
pub struct CosmosKeyPair {
    /// 개인키 (32 bytes)
    pub private_key: [u8; 32],
    /// 압축 공개키 (33 bytes)
    pub public_key: [u8; 33],
}

impl CosmosKeyPair {
    /// 개인키에서 키 쌍 생성
    ///
    /// 키가 유효할 때만 복사하며, 복사본은 키 쌍과 함께 지워집니다.
    pub fn from_private_key(private_key: &[u8; 32]) -> WalletResult<Self> {
        let public_key = private_key_to_public_key(private_key)?;
        Ok(Self {
            private_key: *private_key,
            public_key,
        })
    }

    /// 공개키 hex 문자열 반환
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key)
    }
}

impl Drop for CosmosKeyPair {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

impl std::fmt::Debug for CosmosKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmosKeyPair")
            .field("public_key", &self.public_key_hex())
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// 새 12단어 니모닉 생성
///
/// OS 난수 생성기에서 128비트를 뽑아 BIP-39 영어 단어 목록에 매핑합니다.
/// 난수 생성기를 사용할 수 없으면 `Entropy` 에러를 반환합니다.
pub fn generate_mnemonic() -> WalletResult<SecretPhrase> {
    let mut entropy = Zeroizing::new([0u8; MNEMONIC_ENTROPY_BYTES]);
    OsRng
        .try_fill_bytes(&mut entropy[..])
        .map_err(|e| WalletError::Entropy {
            message: format!("OS random number generator unavailable: {e}"),
        })?;

    let mnemonic = Mnemonic::from_entropy(&entropy[..]).map_err(|e| WalletError::Entropy {
        message: format!("Mnemonic from entropy failed: {e}"),
    })?;

    Ok(SecretPhrase::new(mnemonic.to_string()))
}

/// 니모닉 검증 (단어 목록 + 체크섬)
pub fn validate_mnemonic(mnemonic: &SecretPhrase) -> WalletResult<()> {
    Mnemonic::parse_normalized(mnemonic.expose())
        .map(|_| ())
        .map_err(|e| WalletError::Derivation {
            message: format!("Invalid mnemonic: {e}"),
        })
}

/// 니모닉에서 시드 생성
///
/// # Arguments
///
/// * `mnemonic` - BIP-39 니모닉 문구
/// * `passphrase` - 패스프레이즈 (이 네트워크에서는 항상 빈 문자열)
///
/// # Returns
///
/// 64바이트 시드 (drop 시 지워짐)
pub fn mnemonic_to_seed(mnemonic: &SecretPhrase, passphrase: &str) -> WalletResult<Zeroizing<[u8; 64]>> {
    let parsed =
        Mnemonic::parse_normalized(mnemonic.expose()).map_err(|e| WalletError::Derivation {
            message: format!("Invalid mnemonic: {e}"),
        })?;

    Ok(Zeroizing::new(parsed.to_seed_normalized(passphrase)))
}

/// 시드에서 개인키 파생
///
/// # Arguments
///
/// * `seed` - 64바이트 시드
/// * `path` - BIP-32 경로 문자열 (예: "m/44'/529'/0'/0/0")
pub fn derive_private_key_from_seed(seed: &[u8; 64], path: &str) -> WalletResult<Zeroizing<[u8; 32]>> {
    let path: DerivationPath = path.parse().map_err(|e| WalletError::Derivation {
        message: format!("Invalid derivation path '{path}': {e}"),
    })?;

    let xprv = XPrv::derive_from_path(seed, &path).map_err(|e| WalletError::Derivation {
        message: format!("Key derivation failed: {e}"),
    })?;

    let mut private_key = Zeroizing::new([0u8; 32]);
    private_key.copy_from_slice(&xprv.private_key().to_bytes());
    Ok(private_key)
}

/// 니모닉 + 경로에서 키 쌍 파생
///
/// 동일한 (니모닉, 경로)는 항상 동일한 키를 만듭니다.
pub fn derive_key(mnemonic: &SecretPhrase, path: &str) -> WalletResult<CosmosKeyPair> {
    let seed = mnemonic_to_seed(mnemonic, "")?;
    let private_key = derive_private_key_from_seed(&seed, path)?;
    debug!(path, "derived secp256k1 key");
    CosmosKeyPair::from_private_key(&private_key)
}

/// 개인키에서 압축 공개키 생성
pub fn private_key_to_public_key(private_key: &[u8; 32]) -> WalletResult<[u8; 33]> {
    let signing_key =
        SigningKey::from_bytes(private_key.into()).map_err(|e| WalletError::Derivation {
            message: format!("Invalid private key: {e}"),
        })?;

    let compressed = signing_key.verifying_key().to_encoded_point(true);

    let mut result = [0u8; 33];
    result.copy_from_slice(compressed.as_bytes());
    Ok(result)
}

/// Hex 문자열에서 개인키 파싱
pub fn parse_private_key(hex_str: &str) -> WalletResult<Zeroizing<[u8; 32]>> {
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let bytes = Zeroizing::new(hex::decode(hex_str).map_err(|e| WalletError::Derivation {
        message: format!("Invalid hex: {e}"),
    })?);

    if bytes.len() != 32 {
        return Err(WalletError::Derivation {
            message: format!("Expected 32 bytes, got {}", bytes.len()),
        });
    }

    let mut result = Zeroizing::new([0u8; 32]);
    result.copy_from_slice(&bytes);
    Ok(result)
}
