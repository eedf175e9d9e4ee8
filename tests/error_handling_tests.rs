//! Integration tests for error handling
//!
//! Every failure surfaces as a typed `WalletError`; none are retryable.

use secret_wallet_core::crypto::cosmos::{
    bech32, derive_key, der_to_raw, protobuf, CosmosSignDoc, PreDerivedKey,
};
use secret_wallet_core::{ContractMessageCipher, SecretPhrase, WalletError, WalletResult};

fn code_of<T: std::fmt::Debug>(result: WalletResult<T>) -> &'static str {
    result.unwrap_err().code()
}

#[test]
fn test_error_codes_by_layer() {
    assert_eq!(
        code_of(derive_key(&SecretPhrase::new("one two three"), "m/44'/529'/0'/0/0")),
        "DERIVATION_ERROR"
    );
    assert_eq!(code_of(bech32::decode("secret1invalid")), "ENCODING_ERROR");
    assert_eq!(code_of(bech32::convert_bits(&[0xff], 8, 5, false)), "BIT_PADDING_ERROR");
    assert_eq!(code_of(CosmosSignDoc::decode(&[0x0A, 0x05, 0x01])), "WIRE_FORMAT_ERROR");
    assert_eq!(code_of(der_to_raw(&[0x30, 0x00])), "SIGNATURE_ERROR");

    let agreement = PreDerivedKey::new([0u8; 32], [0u8; 32]);
    assert_eq!(
        code_of(ContractMessageCipher::decrypt(&[0u8; 80], &agreement)),
        "ENCRYPTION_ERROR"
    );
}

#[test]
fn test_truncated_varint() {
    let mut pos = 0;
    let err = protobuf::decode_varint(&[0x80, 0x80], &mut pos).unwrap_err();
    assert!(matches!(err, WalletError::WireFormat { .. }));
    assert!(err.is_encoding_error());
    assert!(!err.is_retryable());
}

#[test]
fn test_error_display_contains_context() {
    let err = bech32::decode("secret1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq").unwrap_err();
    assert!(err.to_string().starts_with("Encoding error"));
}
