//! Contract Message Encryption
//!
//! 컨트랙트 실행 메시지를 AES-256-GCM으로 암호화합니다.
//!
//! # 출력 형식
//!
//! ```text
//! nonce (32) || sender_pubkey (32) || ciphertext || tag (16)
//! ```
//!
//! - IV  = nonce[..12]
//! - AAD = nonce || sender_pubkey
//! - 키  = `KeyAgreement` 구현이 nonce별로 파생
//!
//! 암호화 실패 시 다른 방식으로 대체하지 않고 `Encryption` 에러를 반환합니다.

use crate::errors::{WalletError, WalletResult};
use aes_gcm::aead::{Aead, Payload};
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use hkdf::Hkdf;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;
use tracing::debug;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

/// 메시지별 nonce 길이
pub const NONCE_LEN: usize = 32;
/// X25519 공개키 길이
pub const PUBKEY_LEN: usize = 32;
/// GCM 태그 길이
pub const TAG_LEN: usize = 16;
/// GCM IV 길이 (nonce 앞부분)
pub const IV_LEN: usize = 12;
/// 실행 메시지 앞에 붙는 code hash 길이 (hex)
pub const CODE_HASH_LEN: usize = 64;

/// 컨트랙트 메시지 키 파생용 HKDF salt
pub const HKDF_SALT: [u8; 32] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x4b, 0xea, 0xd8, 0xdf, 0x69, 0x99,
    0x08, 0x52, 0xc2, 0x02, 0xdb, 0x0e, 0x00, 0x97, 0xc1, 0xa1, 0x2e, 0xa6, 0x37, 0xd7, 0xe9, 0x6d,
];

const HEADER_LEN: usize = NONCE_LEN + PUBKEY_LEN;

/// 메시지 암호화 키 합의
///
/// 구현체는 AAD에 들어갈 발신자 공개키와, nonce별 대칭키를 제공합니다.
pub trait KeyAgreement {
    /// 출력 헤더와 AAD에 기록되는 발신자 공개키
    fn sender_public_key(&self) -> [u8; PUBKEY_LEN];

    /// nonce에 대한 AES-256 키
    fn derive_key(&self, nonce: &[u8; NONCE_LEN]) -> WalletResult<Zeroizing<[u8; 32]>>;
}

/// X25519 + HKDF-SHA256 키 합의
///
/// `key = HKDF(salt, X25519(sender_secret, network_pubkey) || nonce)`
pub struct X25519KeyAgreement {
    secret: StaticSecret,
    public: PublicKey,
    network_public: PublicKey,
}

impl X25519KeyAgreement {
    /// 고정된 발신자 비밀키로 생성
    pub fn new(sender_secret: [u8; 32], network_public_key: [u8; PUBKEY_LEN]) -> Self {
        let secret = StaticSecret::from(sender_secret);
        let public = PublicKey::from(&secret);
        Self {
            secret,
            public,
            network_public: PublicKey::from(network_public_key),
        }
    }

    /// OS 난수로 발신자 비밀키 생성
    pub fn random(network_public_key: [u8; PUBKEY_LEN]) -> WalletResult<Self> {
        let mut secret = Zeroizing::new([0u8; 32]);
        OsRng
            .try_fill_bytes(&mut secret[..])
            .map_err(|e| WalletError::Entropy {
                message: format!("OS random number generator unavailable: {e}"),
            })?;
        Ok(Self::new(*secret, network_public_key))
    }
}

impl KeyAgreement for X25519KeyAgreement {
    fn sender_public_key(&self) -> [u8; PUBKEY_LEN] {
        self.public.to_bytes()
    }

    fn derive_key(&self, nonce: &[u8; NONCE_LEN]) -> WalletResult<Zeroizing<[u8; 32]>> {
        let shared = self.secret.diffie_hellman(&self.network_public);
        if !shared.was_contributory() {
            return Err(encryption_err("network public key is a low-order point"));
        }

        let mut ikm = Zeroizing::new(Vec::with_capacity(32 + NONCE_LEN));
        ikm.extend_from_slice(shared.as_bytes());
        ikm.extend_from_slice(nonce);

        let mut key = Zeroizing::new([0u8; 32]);
        Hkdf::<Sha256>::new(Some(&HKDF_SALT), &ikm)
            .expand(&[], &mut key[..])
            .map_err(|e| encryption_err(format!("HKDF expand failed: {e}")))?;
        Ok(key)
    }
}

impl std::fmt::Debug for X25519KeyAgreement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("X25519KeyAgreement")
            .field("public", &hex::encode(self.public.as_bytes()))
            .field("network_public", &hex::encode(self.network_public.as_bytes()))
            .finish_non_exhaustive()
    }
}

/// 호출자가 이미 합의한 대칭키
pub struct PreDerivedKey {
    key: Zeroizing<[u8; 32]>,
    sender_public_key: [u8; PUBKEY_LEN],
}

impl PreDerivedKey {
    pub fn new(key: [u8; 32], sender_public_key: [u8; PUBKEY_LEN]) -> Self {
        Self {
            key: Zeroizing::new(key),
            sender_public_key,
        }
    }
}

impl KeyAgreement for PreDerivedKey {
    fn sender_public_key(&self) -> [u8; PUBKEY_LEN] {
        self.sender_public_key
    }

    fn derive_key(&self, _nonce: &[u8; NONCE_LEN]) -> WalletResult<Zeroizing<[u8; 32]>> {
        Ok(self.key.clone())
    }
}

/// 컨트랙트 메시지 암호화기
pub struct ContractMessageCipher;

impl ContractMessageCipher {
    /// 새 nonce로 평문 암호화
    pub fn encrypt<K: KeyAgreement + ?Sized>(plaintext: &[u8], agreement: &K) -> WalletResult<Vec<u8>> {
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.try_fill_bytes(&mut nonce).map_err(|e| WalletError::Entropy {
            message: format!("OS random number generator unavailable: {e}"),
        })?;
        Self::encrypt_with_nonce(plaintext, agreement, &nonce)
    }

    /// 실행 메시지 암호화 (`code_hash || msg_json`)
    pub fn encrypt_execute_msg<K: KeyAgreement + ?Sized>(
        code_hash: &str,
        msg_json: &str,
        agreement: &K,
    ) -> WalletResult<Vec<u8>> {
        let plaintext = execute_plaintext(code_hash, msg_json)?;
        Self::encrypt(&plaintext, agreement)
    }

    pub(crate) fn encrypt_with_nonce<K: KeyAgreement + ?Sized>(
        plaintext: &[u8],
        agreement: &K,
        nonce: &[u8; NONCE_LEN],
    ) -> WalletResult<Vec<u8>> {
        let sender_public_key = agreement.sender_public_key();
        let key = agreement.derive_key(nonce)?;
        let cipher = Aes256Gcm::new_from_slice(&key[..])
            .map_err(|e| encryption_err(format!("invalid AES key: {e}")))?;

        let aad = associated_data(nonce, &sender_public_key);
        let ciphertext = cipher
            .encrypt(
                Nonce::from_slice(&nonce[..IV_LEN]),
                Payload {
                    msg: plaintext,
                    aad: &aad,
                },
            )
            .map_err(|e| encryption_err(format!("AES-GCM encryption failed: {e}")))?;

        let mut out = Vec::with_capacity(HEADER_LEN + ciphertext.len());
        out.extend_from_slice(nonce);
        out.extend_from_slice(&sender_public_key);
        out.extend_from_slice(&ciphertext);

        debug!(
            plaintext_len = plaintext.len(),
            encrypted_len = out.len(),
            "encrypted contract message"
        );
        Ok(out)
    }

    /// `encrypt` 출력 복호화
    ///
    /// 헤더의 공개키가 키 합의의 발신자 공개키와 다르면 실패합니다.
    pub fn decrypt<K: KeyAgreement + ?Sized>(encrypted: &[u8], agreement: &K) -> WalletResult<Vec<u8>> {
        if encrypted.len() < HEADER_LEN + TAG_LEN {
            return Err(encryption_err(format!(
                "encrypted message too short: {} bytes",
                encrypted.len()
            )));
        }

        let (nonce, rest) = encrypted.split_at(NONCE_LEN);
        let (sender_public_key, ciphertext) = rest.split_at(PUBKEY_LEN);
        if sender_public_key != agreement.sender_public_key() {
            return Err(encryption_err("sender public key does not match key agreement"));
        }

        let mut nonce_arr = [0u8; NONCE_LEN];
        nonce_arr.copy_from_slice(nonce);
        let key = agreement.derive_key(&nonce_arr)?;
        let cipher = Aes256Gcm::new_from_slice(&key[..])
            .map_err(|e| encryption_err(format!("invalid AES key: {e}")))?;

        let aad = [nonce, sender_public_key].concat();
        cipher
            .decrypt(
                Nonce::from_slice(&nonce[..IV_LEN]),
                Payload {
                    msg: ciphertext,
                    aad: &aad,
                },
            )
            .map_err(|_| encryption_err("AES-GCM authentication failed"))
    }
}

fn execute_plaintext(code_hash: &str, msg_json: &str) -> WalletResult<Zeroizing<Vec<u8>>> {
    if code_hash.len() != CODE_HASH_LEN || !code_hash.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(encryption_err(format!(
            "code hash must be {CODE_HASH_LEN} hex characters"
        )));
    }

    let mut plaintext = Zeroizing::new(Vec::with_capacity(CODE_HASH_LEN + msg_json.len()));
    plaintext.extend_from_slice(code_hash.to_ascii_lowercase().as_bytes());
    plaintext.extend_from_slice(msg_json.as_bytes());
    Ok(plaintext)
}

fn associated_data(nonce: &[u8; NONCE_LEN], sender_public_key: &[u8; PUBKEY_LEN]) -> [u8; HEADER_LEN] {
    let mut aad = [0u8; HEADER_LEN];
    aad[..NONCE_LEN].copy_from_slice(nonce);
    aad[NONCE_LEN..].copy_from_slice(sender_public_key);
    aad
}

fn encryption_err(message: impl Into<String>) -> WalletError {
    WalletError::Encryption {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aes_gcm::aead::AeadInPlace;

    const NETWORK_PUBKEY: &str = "ce8d3ad1ccb633ec7b70c17814a5c76ecd029685050d344745ba05870e587d59";
    const CODE_HASH: &str = "af74387e276be8874f07bec3a87023ee49b0e7ebe08178c49d0a49c3c98ed60e";

    fn network_pubkey() -> [u8; 32] {
        hex::decode(NETWORK_PUBKEY).unwrap().try_into().unwrap()
    }

    #[test]
    fn test_hkdf_salt_constant() {
        assert_eq!(
            hex::encode(HKDF_SALT),
            "000000000000000000024bead8df69990852c202db0e0097c1a12ea637d7e96d"
        );
    }

    #[test]
    fn test_x25519_known_vector() {
        let agreement = X25519KeyAgreement::new([1u8; 32], network_pubkey());
        assert_eq!(
            hex::encode(agreement.sender_public_key()),
            "a4e09292b651c278b9772c569f5fa9bb13d906b46ab68c9df9dc2b4409f8a209"
        );

        let key = agreement.derive_key(&[3u8; 32]).unwrap();
        assert_eq!(
            hex::encode(*key),
            "9e9d70a92f423229c011c1053726b782db7ac4f3476ccd9f8857127ccdfcf4e5"
        );

        let out = ContractMessageCipher::encrypt_with_nonce(b"hello", &agreement, &[3u8; 32]).unwrap();
        assert_eq!(&out[..32], &[3u8; 32]);
        assert_eq!(&out[32..64], &agreement.sender_public_key());
        assert_eq!(hex::encode(&out[64..]), "f90b14580ff70ed6c786745a53ae2c686e58bce4f8");
    }

    #[test]
    fn test_fixed_nonce_is_deterministic() {
        let agreement = PreDerivedKey::new([7u8; 32], [9u8; 32]);
        let a = ContractMessageCipher::encrypt_with_nonce(b"{\"a\":1}", &agreement, &[5u8; 32]).unwrap();
        let b = ContractMessageCipher::encrypt_with_nonce(b"{\"a\":1}", &agreement, &[5u8; 32]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64 + 7 + TAG_LEN);
    }

    #[test]
    fn test_tag_is_independently_recomputable() {
        let agreement = PreDerivedKey::new([7u8; 32], [9u8; 32]);
        let nonce = [5u8; 32];
        let out = ContractMessageCipher::encrypt_with_nonce(b"transfer 100", &agreement, &nonce).unwrap();

        let body = &out[HEADER_LEN..out.len() - TAG_LEN];
        let tag = &out[out.len() - TAG_LEN..];

        let cipher = Aes256Gcm::new_from_slice(&[7u8; 32]).unwrap();
        let aad = [&nonce[..], &[9u8; 32][..]].concat();
        let mut buffer = b"transfer 100".to_vec();
        let recomputed = cipher
            .encrypt_in_place_detached(Nonce::from_slice(&nonce[..12]), &aad, &mut buffer)
            .unwrap();

        assert_eq!(buffer, body);
        assert_eq!(recomputed.as_slice(), tag);
    }

    #[test]
    fn test_fresh_nonce_per_call() {
        let agreement = X25519KeyAgreement::new([1u8; 32], network_pubkey());
        let a = ContractMessageCipher::encrypt(b"same", &agreement).unwrap();
        let b = ContractMessageCipher::encrypt(b"same", &agreement).unwrap();
        assert_ne!(&a[..NONCE_LEN], &b[..NONCE_LEN]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_decrypt_roundtrip() {
        let agreement = X25519KeyAgreement::random(network_pubkey()).unwrap();
        let encrypted = ContractMessageCipher::encrypt(b"{\"transfer\":{}}", &agreement).unwrap();
        let decrypted = ContractMessageCipher::decrypt(&encrypted, &agreement).unwrap();
        assert_eq!(decrypted, b"{\"transfer\":{}}");
    }

    #[test]
    fn test_tampering_fails_authentication() {
        let agreement = PreDerivedKey::new([7u8; 32], [9u8; 32]);
        let encrypted = ContractMessageCipher::encrypt(b"payload", &agreement).unwrap();

        // tag
        let mut t = encrypted.clone();
        let last = t.len() - 1;
        t[last] ^= 0x01;
        assert_eq!(
            ContractMessageCipher::decrypt(&t, &agreement).unwrap_err().code(),
            "ENCRYPTION_ERROR"
        );

        // nonce (part of AAD but beyond the IV)
        let mut t = encrypted.clone();
        t[20] ^= 0x01;
        assert!(ContractMessageCipher::decrypt(&t, &agreement).is_err());

        // sender pubkey
        let mut t = encrypted.clone();
        t[40] ^= 0x01;
        assert!(ContractMessageCipher::decrypt(&t, &agreement).is_err());

        assert!(ContractMessageCipher::decrypt(&encrypted[..70], &agreement).is_err());
    }

    #[test]
    fn test_execute_msg_prefixes_code_hash() {
        let agreement = PreDerivedKey::new([7u8; 32], [9u8; 32]);
        let encrypted =
            ContractMessageCipher::encrypt_execute_msg(CODE_HASH, r#"{"increment":{}}"#, &agreement).unwrap();
        let plaintext = ContractMessageCipher::decrypt(&encrypted, &agreement).unwrap();
        assert_eq!(plaintext, format!("{CODE_HASH}{{\"increment\":{{}}}}").into_bytes());
    }

    #[test]
    fn test_execute_msg_rejects_bad_code_hash() {
        let agreement = PreDerivedKey::new([7u8; 32], [9u8; 32]);
        assert!(ContractMessageCipher::encrypt_execute_msg("abc", "{}", &agreement).is_err());
        let not_hex = "z".repeat(64);
        assert!(ContractMessageCipher::encrypt_execute_msg(&not_hex, "{}", &agreement).is_err());
    }

    #[test]
    fn test_low_order_network_key_rejected() {
        let agreement = X25519KeyAgreement::new([1u8; 32], [0u8; 32]);
        let err = agreement.derive_key(&[0u8; 32]).unwrap_err();
        assert!(matches!(err, WalletError::Encryption { .. }));
    }

    #[test]
    fn test_trait_object() {
        let agreement: Box<dyn KeyAgreement> = Box::new(PreDerivedKey::new([7u8; 32], [9u8; 32]));
        let out = ContractMessageCipher::encrypt(b"x", agreement.as_ref()).unwrap();
        assert_eq!(out.len(), HEADER_LEN + 1 + TAG_LEN);
    }
}
