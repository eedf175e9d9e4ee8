//! Common wallet traits
//!
//! ## 모듈 구성
//!
//! - [`traits`]: 서명자 및 외부 비밀 저장소 인터페이스 (Signer, SecretStore)

mod traits;

pub use traits::{SecretStore, Signer, WalletId};
