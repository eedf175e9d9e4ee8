//! Cosmos SDK Transaction Types
//!
//! Transaction types for contract execution on a Cosmos SDK chain with a
//! compute (CosmWasm) module, encoded by hand with the helpers in
//! [`super::protobuf`].
//!
//! # Supported Types
//!
//! - `MsgExecuteContract` - compute module execute message
//! - `CosmosAny` - google.protobuf.Any wrapper
//! - `CosmosPubKey` - Secp256k1 public key
//! - `CosmosFee` / `CosmosCoin` - Transaction fee
//! - `CosmosTxBody` - Transaction body with messages
//! - `CosmosModeInfo` / `CosmosSignerInfo` / `CosmosAuthInfo` - Signer data
//! - `CosmosSignDoc` - Document to sign (SIGN_MODE_DIRECT)
//! - `CosmosTxRaw` - Raw signed transaction
//! - `ExecuteTxBuilder` - Assembles body, auth info and sign doc for one tx
//!
//! # Layout
//!
//! ```text
//! SignDoc
//! ├── 1 body_bytes       TxBody { 1 messages: [Any { type_url, value: MsgExecuteContract }] }
//! ├── 2 auth_info_bytes  AuthInfo { 1 signer_infos: [SignerInfo], 2 fee: Fee }
//! ├── 3 chain_id
//! └── 4 account_number   (varint)
//! ```
//!
//! # References
//!
//! - [Cosmos SDK Tx](https://docs.cosmos.network/main/core/transactions)
//! - [Cosmos Proto Definitions](https://github.com/cosmos/cosmos-sdk/tree/main/proto/cosmos/tx/v1beta1)

use super::address::{address_to_canonical, CANONICAL_ADDRESS_LEN};
use super::protobuf::*;
use crate::errors::{WalletError, WalletResult};
use tracing::debug;

// ============================================================================
// google.protobuf.Any
// ============================================================================

/// google.protobuf.Any - Universal message wrapper
///
/// Used to wrap arbitrary protobuf messages with their type URL.
#[derive(Clone, Debug, PartialEq)]
pub struct CosmosAny {
    /// Type URL (e.g., "/secret.compute.v1beta1.MsgExecuteContract")
    pub type_url: String,
    /// Encoded message bytes
    pub value: Vec<u8>,
}

impl CosmosAny {
    /// Create a new Any message
    pub fn new(type_url: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            type_url: type_url.into(),
            value,
        }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Field 1: type_url (string)
        encode_string(&mut buf, 1, &self.type_url);
        // Field 2: value (bytes)
        encode_bytes(&mut buf, 2, &self.value);
        buf
    }

    /// Decode from protobuf bytes
    pub fn decode(buf: &[u8]) -> WalletResult<Self> {
        let mut any = CosmosAny::new(String::new(), Vec::new());
        for (field, value) in decode_fields(buf)? {
            match field {
                1 => any.type_url = utf8(value.as_bytes()?, "Any.type_url")?,
                2 => any.value = value.as_bytes()?.to_vec(),
                other => return Err(unknown_field("Any", other)),
            }
        }
        Ok(any)
    }
}

// ============================================================================
// MsgExecuteContract
// ============================================================================

/// secret.compute.v1beta1.MsgExecuteContract
///
/// `sender` and `contract` are canonical (20-byte) addresses, not bech32
/// strings. `msg` is the encrypted execute message.
#[derive(Clone, Debug, PartialEq)]
pub struct MsgExecuteContract {
    pub sender: [u8; CANONICAL_ADDRESS_LEN],
    pub contract: [u8; CANONICAL_ADDRESS_LEN],
    pub msg: Vec<u8>,
    pub callback_code_hash: String,
    pub sent_funds: Vec<CosmosCoin>,
    pub callback_sig: Vec<u8>,
}

impl MsgExecuteContract {
    /// Type URL for the compute module execute message
    pub const TYPE_URL: &'static str = "/secret.compute.v1beta1.MsgExecuteContract";

    /// Create from bech32 sender/contract addresses
    pub fn new(sender: &str, contract: &str, msg: Vec<u8>, prefix: &str) -> WalletResult<Self> {
        Ok(Self {
            sender: address_to_canonical(sender, prefix)?,
            contract: address_to_canonical(contract, prefix)?,
            msg,
            callback_code_hash: String::new(),
            sent_funds: vec![],
            callback_sig: vec![],
        })
    }

    /// Attach funds sent along with the call
    pub fn with_funds(mut self, funds: Vec<CosmosCoin>) -> Self {
        self.sent_funds = funds;
        self
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_bytes(&mut buf, 1, &self.sender);
        encode_bytes(&mut buf, 2, &self.contract);
        encode_bytes(&mut buf, 3, &self.msg);
        encode_string(&mut buf, 4, &self.callback_code_hash);
        for coin in &self.sent_funds {
            encode_length_delimited(&mut buf, 5, &coin.encode());
        }
        encode_bytes(&mut buf, 6, &self.callback_sig);
        buf
    }

    /// Decode from protobuf bytes
    pub fn decode(buf: &[u8]) -> WalletResult<Self> {
        let mut msg = Self {
            sender: [0u8; CANONICAL_ADDRESS_LEN],
            contract: [0u8; CANONICAL_ADDRESS_LEN],
            msg: vec![],
            callback_code_hash: String::new(),
            sent_funds: vec![],
            callback_sig: vec![],
        };
        for (field, value) in decode_fields(buf)? {
            match field {
                1 => msg.sender = canonical(value.as_bytes()?, "sender")?,
                2 => msg.contract = canonical(value.as_bytes()?, "contract")?,
                3 => msg.msg = value.as_bytes()?.to_vec(),
                4 => msg.callback_code_hash = utf8(value.as_bytes()?, "callback_code_hash")?,
                5 => msg.sent_funds.push(CosmosCoin::decode(value.as_bytes()?)?),
                6 => msg.callback_sig = value.as_bytes()?.to_vec(),
                other => return Err(unknown_field("MsgExecuteContract", other)),
            }
        }
        Ok(msg)
    }

    /// Wrap as Any message
    pub fn to_any(&self) -> CosmosAny {
        CosmosAny::new(Self::TYPE_URL, self.encode())
    }
}

// ============================================================================
// Public Key
// ============================================================================

/// Cosmos SDK Secp256k1 public key
#[derive(Clone, Debug)]
pub struct CosmosPubKey {
    /// Compressed public key bytes (33 bytes)
    pub key: Vec<u8>,
}

impl CosmosPubKey {
    /// Type URL for secp256k1 public key
    pub const TYPE_URL: &'static str = "/cosmos.crypto.secp256k1.PubKey";

    /// Create a new public key
    pub fn new(key: &[u8]) -> Self {
        Self { key: key.to_vec() }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Field 1: key (bytes)
        encode_bytes(&mut buf, 1, &self.key);
        buf
    }

    /// Wrap as Any message
    pub fn to_any(&self) -> CosmosAny {
        CosmosAny::new(Self::TYPE_URL, self.encode())
    }
}

// ============================================================================
// Fee and Coin
// ============================================================================

/// Transaction fee
#[derive(Clone, Debug)]
pub struct CosmosFee {
    /// Fee amount
    pub amount: Vec<CosmosCoin>,
    /// Gas limit
    pub gas_limit: u64,
    /// Fee payer address (optional)
    pub payer: String,
    /// Fee granter address (optional)
    pub granter: String,
}

impl CosmosFee {
    /// Create a fee with specified amount and gas
    pub fn new(amount: Vec<CosmosCoin>, gas_limit: u64) -> Self {
        Self {
            amount,
            gas_limit,
            payer: String::new(),
            granter: String::new(),
        }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Field 1: amount (repeated Coin)
        for coin in &self.amount {
            encode_length_delimited(&mut buf, 1, &coin.encode());
        }
        // Field 2: gas_limit (uint64)
        encode_uint64(&mut buf, 2, self.gas_limit);
        // Field 3: payer (string)
        encode_string(&mut buf, 3, &self.payer);
        // Field 4: granter (string)
        encode_string(&mut buf, 4, &self.granter);
        buf
    }
}

/// Coin amount
#[derive(Clone, Debug, PartialEq)]
pub struct CosmosCoin {
    /// Denomination (e.g., "uscrt")
    pub denom: String,
    /// Amount as string
    pub amount: String,
}

impl CosmosCoin {
    /// Create a new coin
    pub fn new(denom: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_string(&mut buf, 1, &self.denom);
        encode_string(&mut buf, 2, &self.amount);
        buf
    }

    /// Decode from protobuf bytes
    pub fn decode(buf: &[u8]) -> WalletResult<Self> {
        let mut coin = CosmosCoin::new(String::new(), String::new());
        for (field, value) in decode_fields(buf)? {
            match field {
                1 => coin.denom = utf8(value.as_bytes()?, "Coin.denom")?,
                2 => coin.amount = utf8(value.as_bytes()?, "Coin.amount")?,
                other => return Err(unknown_field("Coin", other)),
            }
        }
        Ok(coin)
    }
}

// ============================================================================
// Transaction Body
// ============================================================================

/// Transaction body containing messages
#[derive(Clone, Debug)]
pub struct CosmosTxBody {
    /// Messages to execute
    pub messages: Vec<CosmosAny>,
    /// Transaction memo
    pub memo: String,
    /// Timeout block height (0 = no timeout)
    pub timeout_height: u64,
}

impl CosmosTxBody {
    /// Create a new transaction body
    pub fn new(messages: Vec<CosmosAny>, memo: &str) -> Self {
        Self {
            messages,
            memo: memo.to_string(),
            timeout_height: 0,
        }
    }

    /// Create with timeout height
    pub fn with_timeout(mut self, timeout_height: u64) -> Self {
        self.timeout_height = timeout_height;
        self
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Field 1: messages (repeated Any)
        for msg in &self.messages {
            encode_length_delimited(&mut buf, 1, &msg.encode());
        }
        // Field 2: memo (string)
        encode_string(&mut buf, 2, &self.memo);
        // Field 3: timeout_height (uint64)
        encode_uint64(&mut buf, 3, self.timeout_height);
        buf
    }

    /// Decode from protobuf bytes
    pub fn decode(buf: &[u8]) -> WalletResult<Self> {
        let mut body = CosmosTxBody::new(vec![], "");
        for (field, value) in decode_fields(buf)? {
            match field {
                1 => body.messages.push(CosmosAny::decode(value.as_bytes()?)?),
                2 => body.memo = utf8(value.as_bytes()?, "TxBody.memo")?,
                3 => body.timeout_height = value.as_u64()?,
                other => return Err(unknown_field("TxBody", other)),
            }
        }
        Ok(body)
    }
}

// ============================================================================
// Signing Mode
// ============================================================================

/// Signing mode
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SignMode {
    /// SIGN_MODE_DIRECT - Sign raw bytes directly
    Direct = 1,
}

/// Mode info for signing
#[derive(Clone, Debug)]
pub struct CosmosModeInfo {
    /// Signing mode
    pub mode: SignMode,
}

impl CosmosModeInfo {
    /// Create DIRECT signing mode
    pub fn direct() -> Self {
        Self {
            mode: SignMode::Direct,
        }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // single.mode (nested message)
        let mut single_buf = Vec::new();
        encode_uint32(&mut single_buf, 1, self.mode as u32);
        encode_length_delimited(&mut buf, 1, &single_buf);
        buf
    }
}

// ============================================================================
// Signer Info
// ============================================================================

/// Signer information
#[derive(Clone, Debug)]
pub struct CosmosSignerInfo {
    /// Public key wrapped as Any
    pub public_key: CosmosAny,
    /// Signing mode info
    pub mode_info: CosmosModeInfo,
    /// Account sequence number
    pub sequence: u64,
}

impl CosmosSignerInfo {
    /// Create a new signer info with secp256k1 public key
    pub fn new(public_key: &[u8], sequence: u64) -> Self {
        Self {
            public_key: CosmosPubKey::new(public_key).to_any(),
            mode_info: CosmosModeInfo::direct(),
            sequence,
        }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Field 1: public_key (Any)
        encode_length_delimited(&mut buf, 1, &self.public_key.encode());
        // Field 2: mode_info (ModeInfo)
        encode_length_delimited(&mut buf, 2, &self.mode_info.encode());
        // Field 3: sequence (uint64)
        encode_uint64(&mut buf, 3, self.sequence);
        buf
    }
}

// ============================================================================
// Auth Info
// ============================================================================

/// Authentication info
#[derive(Clone, Debug)]
pub struct CosmosAuthInfo {
    /// Signer information
    pub signer_infos: Vec<CosmosSignerInfo>,
    /// Transaction fee
    pub fee: CosmosFee,
}

impl CosmosAuthInfo {
    /// Create new auth info
    pub fn new(signer_infos: Vec<CosmosSignerInfo>, fee: CosmosFee) -> Self {
        Self { signer_infos, fee }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Field 1: signer_infos (repeated SignerInfo)
        for signer in &self.signer_infos {
            encode_length_delimited(&mut buf, 1, &signer.encode());
        }
        // Field 2: fee (Fee)
        encode_length_delimited(&mut buf, 2, &self.fee.encode());
        buf
    }
}

// ============================================================================
// Sign Document
// ============================================================================

/// Document to sign (SignDoc)
///
/// This is what gets hashed and signed by the private key.
#[derive(Clone, Debug, PartialEq)]
pub struct CosmosSignDoc {
    /// Encoded TxBody bytes
    pub body_bytes: Vec<u8>,
    /// Encoded AuthInfo bytes
    pub auth_info_bytes: Vec<u8>,
    /// Chain ID
    pub chain_id: String,
    /// Account number
    pub account_number: u64,
}

impl CosmosSignDoc {
    /// Create a new sign document
    pub fn new(
        body_bytes: Vec<u8>,
        auth_info_bytes: Vec<u8>,
        chain_id: impl Into<String>,
        account_number: u64,
    ) -> Self {
        Self {
            body_bytes,
            auth_info_bytes,
            chain_id: chain_id.into(),
            account_number,
        }
    }

    /// Encode to protobuf bytes (this is what gets signed)
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Field 1: body_bytes (bytes)
        encode_bytes(&mut buf, 1, &self.body_bytes);
        // Field 2: auth_info_bytes (bytes)
        encode_bytes(&mut buf, 2, &self.auth_info_bytes);
        // Field 3: chain_id (string)
        encode_string(&mut buf, 3, &self.chain_id);
        // Field 4: account_number (uint64)
        encode_uint64(&mut buf, 4, self.account_number);
        buf
    }

    /// Decode from protobuf bytes
    pub fn decode(buf: &[u8]) -> WalletResult<Self> {
        let mut doc = CosmosSignDoc::new(vec![], vec![], String::new(), 0);
        for (field, value) in decode_fields(buf)? {
            match field {
                1 => doc.body_bytes = value.as_bytes()?.to_vec(),
                2 => doc.auth_info_bytes = value.as_bytes()?.to_vec(),
                3 => doc.chain_id = utf8(value.as_bytes()?, "SignDoc.chain_id")?,
                4 => doc.account_number = value.as_u64()?,
                other => return Err(unknown_field("SignDoc", other)),
            }
        }
        Ok(doc)
    }
}

// ============================================================================
// Raw Transaction
// ============================================================================

/// Raw signed transaction (TxRaw)
///
/// This is the final format broadcast to the network.
#[derive(Clone, Debug, PartialEq)]
pub struct CosmosTxRaw {
    /// Encoded TxBody bytes
    pub body_bytes: Vec<u8>,
    /// Encoded AuthInfo bytes
    pub auth_info_bytes: Vec<u8>,
    /// Signatures
    pub signatures: Vec<Vec<u8>>,
}

impl CosmosTxRaw {
    /// Create a new raw transaction
    pub fn new(body_bytes: Vec<u8>, auth_info_bytes: Vec<u8>, signatures: Vec<Vec<u8>>) -> Self {
        Self {
            body_bytes,
            auth_info_bytes,
            signatures,
        }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Field 1: body_bytes (bytes)
        encode_bytes(&mut buf, 1, &self.body_bytes);
        // Field 2: auth_info_bytes (bytes)
        encode_bytes(&mut buf, 2, &self.auth_info_bytes);
        // Field 3: signatures (repeated bytes)
        for sig in &self.signatures {
            encode_bytes(&mut buf, 3, sig);
        }
        buf
    }

    /// Decode from protobuf bytes
    pub fn decode(buf: &[u8]) -> WalletResult<Self> {
        let mut tx = CosmosTxRaw::new(vec![], vec![], vec![]);
        for (field, value) in decode_fields(buf)? {
            match field {
                1 => tx.body_bytes = value.as_bytes()?.to_vec(),
                2 => tx.auth_info_bytes = value.as_bytes()?.to_vec(),
                3 => tx.signatures.push(value.as_bytes()?.to_vec()),
                other => return Err(unknown_field("TxRaw", other)),
            }
        }
        Ok(tx)
    }

    /// Encode to base64 string for broadcasting
    pub fn to_base64(&self) -> String {
        use base64::{engine::general_purpose::STANDARD, Engine};
        STANDARD.encode(self.encode())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Unsigned contract-execution transaction
#[derive(Clone, Debug)]
pub struct UnsignedExecuteTx {
    pub body_bytes: Vec<u8>,
    pub auth_info_bytes: Vec<u8>,
    pub sign_doc: CosmosSignDoc,
}

impl UnsignedExecuteTx {
    /// Bytes to be hashed and signed
    pub fn sign_doc_bytes(&self) -> Vec<u8> {
        self.sign_doc.encode()
    }
}

/// Builds the body, auth info and sign doc of a single transaction
///
/// `build` consumes the builder, so one builder can never feed two
/// transactions.
#[derive(Debug)]
pub struct ExecuteTxBuilder {
    chain_id: String,
    account_number: u64,
    sequence: u64,
    public_key: [u8; 33],
    messages: Vec<MsgExecuteContract>,
    fee: CosmosFee,
    memo: String,
    timeout_height: u64,
}

impl ExecuteTxBuilder {
    pub fn new(
        chain_id: impl Into<String>,
        account_number: u64,
        sequence: u64,
        public_key: &[u8; 33],
        fee: CosmosFee,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            account_number,
            sequence,
            public_key: *public_key,
            messages: vec![],
            fee,
            memo: String::new(),
            timeout_height: 0,
        }
    }

    pub fn message(mut self, msg: MsgExecuteContract) -> Self {
        self.messages.push(msg);
        self
    }

    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn timeout_height(mut self, height: u64) -> Self {
        self.timeout_height = height;
        self
    }

    pub fn build(self) -> WalletResult<UnsignedExecuteTx> {
        if self.messages.is_empty() {
            return Err(WalletError::wire("transaction has no messages"));
        }
        if self.chain_id.is_empty() {
            return Err(WalletError::wire("chain id is empty"));
        }

        let messages = self.messages.iter().map(MsgExecuteContract::to_any).collect();
        let body_bytes = CosmosTxBody::new(messages, &self.memo)
            .with_timeout(self.timeout_height)
            .encode();

        let signer_info = CosmosSignerInfo::new(&self.public_key, self.sequence);
        let auth_info_bytes = CosmosAuthInfo::new(vec![signer_info], self.fee).encode();

        let sign_doc = CosmosSignDoc::new(
            body_bytes.clone(),
            auth_info_bytes.clone(),
            self.chain_id,
            self.account_number,
        );

        debug!(
            body_len = body_bytes.len(),
            auth_info_len = auth_info_bytes.len(),
            chain_id = %sign_doc.chain_id,
            "built execute sign doc"
        );

        Ok(UnsignedExecuteTx {
            body_bytes,
            auth_info_bytes,
            sign_doc,
        })
    }
}

fn utf8(bytes: &[u8], what: &str) -> WalletResult<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| WalletError::wire(format!("{what} is not valid UTF-8: {e}")))
}

fn canonical(bytes: &[u8], what: &str) -> WalletResult<[u8; CANONICAL_ADDRESS_LEN]> {
    <[u8; CANONICAL_ADDRESS_LEN]>::try_from(bytes).map_err(|_| {
        WalletError::wire(format!(
            "{what} must be {CANONICAL_ADDRESS_LEN} bytes, got {}",
            bytes.len()
        ))
    })
}

fn unknown_field(message: &str, field: u32) -> WalletError {
    WalletError::wire(format!("unexpected field {field} in {message}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::cosmos::bech32;

    fn addr(byte: u8) -> String {
        bech32::encode("secret", &[byte; 20]).unwrap()
    }

    #[test]
    fn test_type_urls() {
        assert_eq!(MsgExecuteContract::TYPE_URL.len(), 42);
        assert_eq!(CosmosPubKey::TYPE_URL, "/cosmos.crypto.secp256k1.PubKey");
        assert_eq!(CosmosPubKey::TYPE_URL.len(), 31);
    }

    #[test]
    fn test_cosmos_any_roundtrip() {
        let any = CosmosAny::new("/test.Msg", vec![1, 2, 3]);
        let encoded = any.encode();
        assert_eq!(encoded[0], 0x0A);
        assert_eq!(CosmosAny::decode(&encoded).unwrap(), any);
    }

    #[test]
    fn test_msg_execute_contract_encoding() {
        let msg = MsgExecuteContract::new(&addr(1), &addr(2), vec![7u8; 3], "secret").unwrap();
        let encoded = msg.encode();

        let mut expected = vec![0x0A, 20];
        expected.extend_from_slice(&[1u8; 20]);
        expected.extend_from_slice(&[0x12, 20]);
        expected.extend_from_slice(&[2u8; 20]);
        expected.extend_from_slice(&[0x1A, 3, 7, 7, 7]);
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_msg_execute_contract_large_msg() {
        let msg = MsgExecuteContract::new(&addr(1), &addr(2), vec![0u8; 300], "secret").unwrap();
        let encoded = msg.encode();
        // 22 + 22 + (1 tag + 2 length + 300)
        assert_eq!(encoded.len(), 22 + 22 + 303);
        assert_eq!(&encoded[44..47], &[0x1A, 0xAC, 0x02]);

        let decoded = MsgExecuteContract::decode(&encoded).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_msg_execute_contract_rejects_foreign_prefix() {
        let foreign = bech32::encode("cosmos", &[1u8; 20]).unwrap();
        let err = MsgExecuteContract::new(&foreign, &addr(2), vec![], "secret").unwrap_err();
        assert_eq!(err.code(), "ENCODING_ERROR");
    }

    #[test]
    fn test_msg_execute_contract_with_funds() {
        let msg = MsgExecuteContract::new(&addr(1), &addr(2), vec![1], "secret")
            .unwrap()
            .with_funds(vec![CosmosCoin::new("uscrt", "1000")]);
        let decoded = MsgExecuteContract::decode(&msg.encode()).unwrap();
        assert_eq!(decoded.sent_funds, vec![CosmosCoin::new("uscrt", "1000")]);
    }

    #[test]
    fn test_cosmos_pubkey_to_any() {
        let any = CosmosPubKey::new(&[0u8; 33]).to_any();
        assert_eq!(any.type_url, "/cosmos.crypto.secp256k1.PubKey");
        assert_eq!(any.value.len(), 35);
    }

    #[test]
    fn test_cosmos_mode_info_direct() {
        assert_eq!(CosmosModeInfo::direct().encode(), vec![0x0A, 0x02, 0x08, 0x01]);
    }

    #[test]
    fn test_cosmos_signer_info_encode() {
        let encoded = CosmosSignerInfo::new(&[2u8; 33], 5).encode();
        // pubkey Any (2 + 70) + mode_info (2 + 4) + sequence (2)
        assert_eq!(encoded.len(), 72 + 6 + 2);
        assert_eq!(&encoded[encoded.len() - 2..], &[0x18, 0x05]);
    }

    #[test]
    fn test_cosmos_signer_info_zero_sequence_omitted() {
        let encoded = CosmosSignerInfo::new(&[2u8; 33], 0).encode();
        assert_eq!(encoded.len(), 72 + 6);
    }

    #[test]
    fn test_cosmos_fee_encode() {
        let fee = CosmosFee::new(vec![CosmosCoin::new("uscrt", "50000")], 200_000);
        let encoded = fee.encode();
        // coin (2 + 14) + gas (1 + 3)
        assert_eq!(encoded.len(), 16 + 4);
    }

    #[test]
    fn test_sign_doc_roundtrip() {
        let doc = CosmosSignDoc::new(vec![1u8; 200], vec![3, 4], "test-1", 300);
        let decoded = CosmosSignDoc::decode(&doc.encode()).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn test_sign_doc_decode_rejects_unknown_field() {
        let mut buf = CosmosSignDoc::new(vec![1], vec![2], "c", 1).encode();
        encode_string(&mut buf, 9, "extra");
        assert!(CosmosSignDoc::decode(&buf).is_err());
    }

    #[test]
    fn test_tx_raw_roundtrip() {
        let tx = CosmosTxRaw::new(vec![1, 2], vec![3, 4], vec![vec![5u8; 64]]);
        let decoded = CosmosTxRaw::decode(&tx.encode()).unwrap();
        assert_eq!(decoded, tx);
        assert!(!tx.to_base64().is_empty());
    }

    #[test]
    fn test_builder_requires_message() {
        let fee = CosmosFee::new(vec![], 1);
        let err = ExecuteTxBuilder::new("test-1", 1, 0, &[2u8; 33], fee)
            .build()
            .unwrap_err();
        assert!(matches!(err, WalletError::WireFormat { .. }));
    }

    #[test]
    fn test_sign_doc_exact_length_with_multibyte_lengths() {
        // 200-byte msg pushes MsgExecuteContract, Any and TxBody lengths past 127
        let msg = MsgExecuteContract::new(&addr(1), &addr(2), vec![0u8; 200], "secret").unwrap();
        let fee = CosmosFee::new(vec![CosmosCoin::new("uscrt", "50000")], 200_000);
        let tx = ExecuteTxBuilder::new("test-1", 42, 5, &[2u8; 33], fee)
            .message(msg)
            .build()
            .unwrap();

        assert_eq!(tx.body_bytes.len(), 297);
        assert_eq!(tx.auth_info_bytes.len(), 104);

        let bytes = tx.sign_doc_bytes();
        assert_eq!(bytes.len(), 416);
        // field 1, length 297 = 0xA9 0x02
        assert_eq!(&bytes[..3], &[0x0A, 0xA9, 0x02]);
    }

    #[test]
    fn test_builder_wraps_message_in_any() {
        let msg = MsgExecuteContract::new(&addr(1), &addr(2), vec![9u8; 10], "secret").unwrap();
        let fee = CosmosFee::new(vec![CosmosCoin::new("uscrt", "1")], 100);
        let tx = ExecuteTxBuilder::new("test-1", 7, 3, &[2u8; 33], fee)
            .message(msg.clone())
            .memo("hello")
            .build()
            .unwrap();

        let body = CosmosTxBody::decode(&tx.body_bytes).unwrap();
        assert_eq!(body.memo, "hello");
        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0].type_url, MsgExecuteContract::TYPE_URL);
        assert_eq!(MsgExecuteContract::decode(&body.messages[0].value).unwrap(), msg);

        let doc = CosmosSignDoc::decode(&tx.sign_doc_bytes()).unwrap();
        assert_eq!(doc.account_number, 7);
        assert_eq!(doc.chain_id, "test-1");
        assert_eq!(doc.auth_info_bytes, tx.auth_info_bytes);
    }
}
