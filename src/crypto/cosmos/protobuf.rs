//! Protobuf Wire Format Utilities
//!
//! Hand-written Protocol Buffers wire-format encoder and decoder used for the
//! Cosmos SDK transaction types. No code generation or reflection is involved:
//! every message encodes its fields in ascending field-number order, which is
//! what the reference clients emit and what the chain re-encodes to verify
//! signatures.
//!
//! # Wire Types
//!
//! | Type | Meaning | Used For |
//! |------|---------|----------|
//! | 0 | Varint | uint32, uint64, enum |
//! | 1 | 64-bit | fixed64 (decode only) |
//! | 2 | Length-delimited | string, bytes, embedded messages |
//! | 5 | 32-bit | fixed32 (decode only) |
//!
//! Every length prefix is a full varint. A one-byte length is only correct
//! while the payload is shorter than 128 bytes; encrypted contract messages
//! routinely exceed that.
//!
//! # Example
//!
//! ```ignore
//! use secret_wallet_core::crypto::cosmos::protobuf::*;
//!
//! let mut buf = Vec::new();
//! encode_string(&mut buf, 1, "hello");
//! encode_uint64(&mut buf, 2, 12345);
//! ```
//!
//! # References
//!
//! - [Protocol Buffers Encoding](https://protobuf.dev/programming-guides/encoding/)

use crate::errors::{WalletError, WalletResult};

/// Wire type constants
pub mod wire_type {
    /// Varint: int32, int64, uint32, uint64, sint32, sint64, bool, enum
    pub const VARINT: u8 = 0;
    /// 64-bit: fixed64, sfixed64, double
    pub const FIXED64: u8 = 1;
    /// Length-delimited: string, bytes, embedded messages, packed repeated fields
    pub const LENGTH_DELIMITED: u8 = 2;
    /// 32-bit: fixed32, sfixed32, float
    pub const FIXED32: u8 = 5;
}

/// Maximum encoded size of a u64 varint
pub const MAX_VARINT_LEN: usize = 10;

/// Encode a variable-length integer (varint)
///
/// 7 payload bits per byte, least-significant group first, high bit set on
/// every byte except the last.
#[inline]
pub fn encode_varint(buf: &mut Vec<u8>, value: u64) {
    let mut v = value;
    while v >= 0x80 {
        buf.push((v as u8) | 0x80);
        v >>= 7;
    }
    buf.push(v as u8);
}

/// Number of bytes `encode_varint` emits for `value`
#[inline]
pub fn encoded_varint_len(value: u64) -> usize {
    let mut v = value;
    let mut len = 1;
    while v >= 0x80 {
        v >>= 7;
        len += 1;
    }
    len
}

/// Encode a field tag (field number + wire type)
#[inline]
pub fn encode_tag(buf: &mut Vec<u8>, field_number: u32, wire_type: u8) {
    encode_varint(buf, ((field_number as u64) << 3) | (wire_type as u64));
}

/// Encode a uint32 field
///
/// Skips encoding if value is 0 (protobuf default behavior).
#[inline]
pub fn encode_uint32(buf: &mut Vec<u8>, field_number: u32, value: u32) {
    if value == 0 {
        return;
    }
    encode_tag(buf, field_number, wire_type::VARINT);
    encode_varint(buf, value as u64);
}

/// Encode a uint64 field
///
/// Skips encoding if value is 0 (protobuf default behavior).
#[inline]
pub fn encode_uint64(buf: &mut Vec<u8>, field_number: u32, value: u64) {
    if value == 0 {
        return;
    }
    encode_tag(buf, field_number, wire_type::VARINT);
    encode_varint(buf, value);
}

/// Encode a string field
///
/// Skips encoding if value is empty (protobuf default behavior).
#[inline]
pub fn encode_string(buf: &mut Vec<u8>, field_number: u32, value: &str) {
    encode_bytes(buf, field_number, value.as_bytes());
}

/// Encode a bytes field
///
/// Skips encoding if value is empty (protobuf default behavior).
#[inline]
pub fn encode_bytes(buf: &mut Vec<u8>, field_number: u32, value: &[u8]) {
    if value.is_empty() {
        return;
    }
    encode_length_delimited(buf, field_number, value);
}

/// Encode a length-delimited field (for embedded messages)
///
/// Unlike `encode_bytes`, this always encodes even if value is empty,
/// which is needed for embedded message fields.
#[inline]
pub fn encode_length_delimited(buf: &mut Vec<u8>, field_number: u32, value: &[u8]) {
    encode_tag(buf, field_number, wire_type::LENGTH_DELIMITED);
    encode_varint(buf, value.len() as u64);
    buf.extend_from_slice(value);
}

/// Decode a varint starting at `*pos`, advancing `pos` past it
pub fn decode_varint(buf: &[u8], pos: &mut usize) -> WalletResult<u64> {
    let mut value: u64 = 0;
    for i in 0..MAX_VARINT_LEN {
        let byte = *buf
            .get(*pos)
            .ok_or_else(|| WalletError::wire(format!("truncated varint at offset {}", *pos)))?;
        *pos += 1;

        if i == MAX_VARINT_LEN - 1 && byte > 0x01 {
            return Err(WalletError::wire("varint overflows u64"));
        }
        value |= ((byte & 0x7f) as u64) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(WalletError::wire("varint longer than 10 bytes"))
}

/// A decoded field value borrowing from the input buffer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WireValue<'a> {
    Varint(u64),
    Fixed64(u64),
    LengthDelimited(&'a [u8]),
    Fixed32(u32),
}

impl<'a> WireValue<'a> {
    /// Payload of a length-delimited field
    pub fn as_bytes(&self) -> WalletResult<&'a [u8]> {
        match self {
            WireValue::LengthDelimited(bytes) => Ok(*bytes),
            other => Err(WalletError::wire(format!(
                "expected length-delimited field, got {other:?}"
            ))),
        }
    }

    /// Value of a varint field
    pub fn as_u64(&self) -> WalletResult<u64> {
        match self {
            WireValue::Varint(v) => Ok(*v),
            other => Err(WalletError::wire(format!("expected varint field, got {other:?}"))),
        }
    }
}

/// Split a message into `(field_number, value)` pairs in wire order
pub fn decode_fields(buf: &[u8]) -> WalletResult<Vec<(u32, WireValue<'_>)>> {
    let mut fields = Vec::new();
    let mut pos = 0;

    while pos < buf.len() {
        let key = decode_varint(buf, &mut pos)?;
        let field_number = u32::try_from(key >> 3)
            .map_err(|_| WalletError::wire(format!("field number {} out of range", key >> 3)))?;
        if field_number == 0 {
            return Err(WalletError::wire("field number 0 is reserved"));
        }

        let value = match (key & 0x07) as u8 {
            wire_type::VARINT => WireValue::Varint(decode_varint(buf, &mut pos)?),
            wire_type::FIXED64 => {
                let bytes = take(buf, &mut pos, 8)?;
                let mut arr = [0u8; 8];
                arr.copy_from_slice(bytes);
                WireValue::Fixed64(u64::from_le_bytes(arr))
            }
            wire_type::LENGTH_DELIMITED => {
                let len = decode_varint(buf, &mut pos)?;
                let len = usize::try_from(len)
                    .map_err(|_| WalletError::wire(format!("length {len} out of range")))?;
                WireValue::LengthDelimited(take(buf, &mut pos, len)?)
            }
            wire_type::FIXED32 => {
                let bytes = take(buf, &mut pos, 4)?;
                let mut arr = [0u8; 4];
                arr.copy_from_slice(bytes);
                WireValue::Fixed32(u32::from_le_bytes(arr))
            }
            other => {
                return Err(WalletError::wire(format!(
                    "unsupported wire type {other} for field {field_number}"
                )))
            }
        };
        fields.push((field_number, value));
    }

    Ok(fields)
}

fn take<'a>(buf: &'a [u8], pos: &mut usize, len: usize) -> WalletResult<&'a [u8]> {
    let end = pos
        .checked_add(len)
        .filter(|end| *end <= buf.len())
        .ok_or_else(|| {
            WalletError::wire(format!(
                "field of {len} bytes at offset {} overruns {}-byte buffer",
                *pos,
                buf.len()
            ))
        })?;
    let out = &buf[*pos..end];
    *pos = end;
    Ok(out)
}
