//! Wallet Facade
//!
//! 키 쌍과 체인 설정을 묶어 permit 서명과 컨트랙트 실행 트랜잭션 생성을
//! 제공하는 고수준 인터페이스입니다.
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use secret_wallet_core::crypto::cosmos::{CosmosWallet, SecretPhrase, SECRET_MAINNET};
//!
//! let wallet = CosmosWallet::from_mnemonic(&SecretPhrase::new(words), &SECRET_MAINNET)?;
//! println!("Address: {}", wallet.address());
//!
//! let permit = wallet.sign_permit("my-permit", vec![token], vec!["owner".into()])?;
//! let tx = wallet.build_execute_tx(&request, &agreement)?;
//! ```

use super::address::{public_key_to_address, ChainConfig};
use super::cipher::{ContractMessageCipher, KeyAgreement};
use super::keys::{derive_key, generate_mnemonic, parse_private_key, validate_mnemonic, CosmosKeyPair, SecretPhrase};
use super::permit::{sign_permit, Permit, PermitParams};
use super::signer::{assemble_tx_raw, sign_bytes, validate_sender_matches, verify_signature, CosmosSignature};
use super::transaction::{ExecuteTxBuilder, MsgExecuteContract};
use crate::config::TxConfig;
use crate::crypto::common::{SecretStore, Signer, WalletId};
use crate::errors::{WalletError, WalletResult};
use tracing::debug;

/// 컨트랙트 실행 요청
#[derive(Debug, Clone)]
pub struct ExecuteRequest {
    /// 발신자 주소 (서명 키의 주소와 같아야 함)
    pub sender: String,
    /// 컨트랙트 주소
    pub contract: String,
    /// 컨트랙트 code hash (64 hex)
    pub code_hash: String,
    /// 실행 메시지
    pub msg: serde_json::Value,
    pub account_number: u64,
    pub sequence: u64,
    pub config: TxConfig,
}

/// 서명된 트랜잭션
#[derive(Debug, Clone)]
pub struct SignedTx {
    /// 인코딩된 TxRaw
    pub tx_bytes: Vec<u8>,
    pub signature: CosmosSignature,
    /// MsgExecuteContract.msg 에 들어간 암호문
    pub encrypted_msg: Vec<u8>,
}

impl SignedTx {
    /// 브로드캐스트용 base64
    pub fn to_base64(&self) -> String {
        use base64::{engine::general_purpose::STANDARD, Engine};
        STANDARD.encode(&self.tx_bytes)
    }
}

/// 지갑
pub struct CosmosWallet {
    keypair: CosmosKeyPair,
    config: ChainConfig,
    address: String,
}

impl CosmosWallet {
    /// 니모닉에서 지갑 생성 (체인의 고정 경로 사용)
    pub fn from_mnemonic(mnemonic: &SecretPhrase, config: &ChainConfig) -> WalletResult<Self> {
        validate_mnemonic(mnemonic)?;
        let keypair = derive_key(mnemonic, config.derivation_path)?;
        Self::from_keypair(keypair, config)
    }

    /// 개인키에서 지갑 생성
    pub fn from_private_key(private_key: &[u8; 32], config: &ChainConfig) -> WalletResult<Self> {
        let keypair = CosmosKeyPair::from_private_key(private_key)?;
        Self::from_keypair(keypair, config)
    }

    /// Hex 개인키에서 지갑 생성
    pub fn from_private_key_hex(hex_key: &str, config: &ChainConfig) -> WalletResult<Self> {
        let private_key = parse_private_key(hex_key)?;
        Self::from_private_key(&private_key, config)
    }

    /// 새 니모닉 생성 후 지갑 생성
    ///
    /// 니모닉은 호출자가 저장하도록 함께 반환합니다.
    pub fn generate(config: &ChainConfig) -> WalletResult<(Self, SecretPhrase)> {
        let mnemonic = generate_mnemonic()?;
        let wallet = Self::from_mnemonic(&mnemonic, config)?;
        Ok((wallet, mnemonic))
    }

    /// 저장소의 지갑으로 생성
    pub fn from_store<S: SecretStore + ?Sized>(
        store: &S,
        id: &WalletId,
        config: &ChainConfig,
    ) -> WalletResult<Self> {
        let mnemonic = store.get(id)?;
        debug!(wallet_id = %id, "loaded mnemonic from secret store");
        Self::from_mnemonic(&mnemonic, config)
    }

    /// 저장소에서 선택된 지갑으로 생성
    pub fn from_selected<S: SecretStore + ?Sized>(store: &S, config: &ChainConfig) -> WalletResult<Self> {
        let id = store.selected()?.ok_or_else(|| WalletError::SecretStore {
            message: "no wallet selected".into(),
        })?;
        Self::from_store(store, &id, config)
    }

    fn from_keypair(keypair: CosmosKeyPair, config: &ChainConfig) -> WalletResult<Self> {
        let address = public_key_to_address(&keypair.public_key, config.address_prefix)?;
        debug!(address = %address, chain = config.chain_id, "wallet ready");
        Ok(Self {
            keypair,
            config: config.clone(),
            address,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn public_key(&self) -> &[u8; 33] {
        &self.keypair.public_key
    }

    pub fn public_key_hex(&self) -> String {
        self.keypair.public_key_hex()
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn sign_bytes(&self, data: &[u8]) -> WalletResult<CosmosSignature> {
        sign_bytes(&self.keypair.private_key, data)
    }

    pub fn verify(&self, data: &[u8], signature: &CosmosSignature) -> WalletResult<bool> {
        verify_signature(&self.keypair.public_key, data, signature)
    }

    /// 현재 체인 ID로 query permit 서명
    pub fn sign_permit(
        &self,
        permit_name: &str,
        allowed_tokens: Vec<String>,
        permissions: Vec<String>,
    ) -> WalletResult<Permit> {
        let params = PermitParams::new(self.config.chain_id, permit_name, allowed_tokens, permissions);
        sign_permit(&params, &self.keypair)
    }

    /// 컨트랙트 실행 트랜잭션 생성
    ///
    /// 1. sender가 이 지갑 주소인지 확인 (다르면 `AddressMismatch`, 서명 없음)
    /// 2. `code_hash || msg` 암호화
    /// 3. MsgExecuteContract → TxBody / AuthInfo / SignDoc
    /// 4. SignDoc 서명 후 TxRaw 조립
    pub fn build_execute_tx<K: KeyAgreement + ?Sized>(
        &self,
        request: &ExecuteRequest,
        agreement: &K,
    ) -> WalletResult<SignedTx> {
        let prefix = self.config.address_prefix;
        validate_sender_matches(&request.sender, &self.keypair, prefix)?;

        let msg_json = serde_json::to_string(&request.msg)?;
        let encrypted_msg =
            ContractMessageCipher::encrypt_execute_msg(&request.code_hash, &msg_json, agreement)?;

        let msg = MsgExecuteContract::new(&request.sender, &request.contract, encrypted_msg.clone(), prefix)?
            .with_funds(request.config.funds().to_vec());

        let unsigned = ExecuteTxBuilder::new(
            self.config.chain_id,
            request.account_number,
            request.sequence,
            &self.keypair.public_key,
            request.config.fee(self.config.fee_denom),
        )
        .message(msg)
        .memo(request.config.memo())
        .timeout_height(request.config.timeout_height())
        .build()?;

        let signature = sign_bytes(&self.keypair.private_key, &unsigned.sign_doc_bytes())?;
        let tx_bytes = assemble_tx_raw(&unsigned.body_bytes, &unsigned.auth_info_bytes, &signature);

        debug!(
            contract = %request.contract,
            sequence = request.sequence,
            tx_len = tx_bytes.len(),
            "signed execute transaction"
        );

        Ok(SignedTx {
            tx_bytes,
            signature,
            encrypted_msg,
        })
    }

    /// 같은 공개키의 다른 접두사 주소
    pub fn address_for_prefix(&self, prefix: &str) -> WalletResult<String> {
        public_key_to_address(&self.keypair.public_key, prefix)
    }
}

impl Signer for CosmosWallet {
    fn address(&self) -> &str {
        &self.address
    }

    fn public_key(&self) -> &[u8; 33] {
        &self.keypair.public_key
    }

    fn sign_bytes(&self, data: &[u8]) -> WalletResult<CosmosSignature> {
        sign_bytes(&self.keypair.private_key, data)
    }
}

impl std::fmt::Debug for CosmosWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmosWallet")
            .field("address", &self.address)
            .field("chain", &self.config.name)
            .field("public_key", &self.public_key_hex())
            .finish()
    }
}
