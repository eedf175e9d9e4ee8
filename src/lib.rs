//! Secret Wallet Core
//!
//! 니모닉에서 주소를 만들고, query permit 서명과 암호화된 컨트랙트 실행
//! 트랜잭션을 바이트 단위로 생성하는 동기식 지갑 엔진입니다.
//!
//! I/O, 영속화, 네트워크 전송은 하지 않습니다. 비밀 저장소는
//! [`crypto::SecretStore`] 트레이트로 호출자가 제공합니다.

pub mod config;
pub mod crypto;
pub mod errors;
pub mod utils;

// Re-exports
pub use config::TxConfig;
pub use crypto::{
    ChainConfig, ContractMessageCipher, CosmosWallet, ExecuteRequest, Permit, SecretPhrase,
    SecretStore, SignedTx, Signer, WalletId, SECRET_MAINNET, SECRET_TESTNET,
};
pub use errors::{WalletError, WalletResult};
