//! Bech32 Codec (BIP-0173)
//!
//! 주소 인코딩에 사용되는 Bech32 인코더/디코더입니다.
//! 체크섬과 문자 집합 처리는 `bech32` 크레이트에 맡기고, 여기서는
//! 에러를 `WalletError`로 옮기고 비트 재구성 유틸리티를 제공합니다.
//!
//! # 구조
//!
//! ```text
//! <hrp> "1" <data (5-bit groups)> <checksum (6 symbols)>
//! ```
//!
//! 인코딩 결과는 항상 소문자입니다.
//!
//! # 참조
//!
//! - [BIP-173](https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki)

use crate::errors::{WalletError, WalletResult};
use ::bech32::primitives::decode::CheckedHrpstring;
use ::bech32::{Bech32, Fe32, Hrp};

/// 비트 그룹 재구성
///
/// `from_bits` 단위 값의 나열을 `to_bits` 단위로 다시 묶습니다 (MSB 우선).
///
/// # Arguments
///
/// * `data` - 입력 값 (각 값은 `from_bits` 비트 이내)
/// * `from_bits` - 입력 그룹 크기 (1..=8)
/// * `to_bits` - 출력 그룹 크기 (1..=8)
/// * `pad` - 남은 비트를 0으로 채워 출력할지 여부
///
/// `pad == false`이면 남은 비트가 `from_bits` 이상이거나 0이 아닐 때
/// 잘라내지 않고 `BitPadding` 에러를 반환합니다.
pub fn convert_bits(data: &[u8], from_bits: u32, to_bits: u32, pad: bool) -> WalletResult<Vec<u8>> {
    let padding_err = |message: String| WalletError::BitPadding {
        from_bits,
        to_bits,
        message,
    };

    if !(1..=8).contains(&from_bits) || !(1..=8).contains(&to_bits) {
        return Err(padding_err("group sizes must be between 1 and 8 bits".into()));
    }

    let max_value: u32 = (1 << to_bits) - 1;
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(data.len() * from_bits as usize / to_bits as usize + 1);

    for (i, &value) in data.iter().enumerate() {
        let value = value as u32;
        if value >> from_bits != 0 {
            return Err(padding_err(format!(
                "value {value} at index {i} does not fit in {from_bits} bits"
            )));
        }
        acc = (acc << from_bits) | value;
        bits += from_bits;
        while bits >= to_bits {
            bits -= to_bits;
            out.push(((acc >> bits) & max_value) as u8);
        }
        acc &= (1 << bits) - 1;
    }

    if pad {
        if bits > 0 {
            out.push(((acc << (to_bits - bits)) & max_value) as u8);
        }
    } else if bits >= from_bits {
        return Err(padding_err(format!("{bits} leftover bits exceed one input group")));
    } else if (acc << (to_bits - bits)) & max_value != 0 {
        return Err(padding_err("non-zero padding bits".into()));
    }

    Ok(out)
}

/// Bech32 인코딩
///
/// 8비트 바이트를 5비트 그룹으로 변환(패딩 포함)한 뒤 체크섬을 붙여
/// 소문자 문자열로 인코딩합니다.
pub fn encode(hrp: &str, data: &[u8]) -> WalletResult<String> {
    let hrp = Hrp::parse(hrp)
        .map_err(|e| WalletError::encoding(format!("Invalid address prefix '{hrp}': {e}")))?;

    ::bech32::encode::<Bech32>(hrp, data)
        .map_err(|e| WalletError::encoding(format!("Bech32 encoding failed: {e}")))
}

/// Bech32 디코딩
///
/// 전부 대문자인 문자열도 받아들이며, 대소문자가 섞이면 에러입니다.
/// 체크섬 이후의 5비트 그룹은 `convert_bits`로 되돌리므로 0이 아닌
/// 패딩은 `BitPadding` 에러입니다.
///
/// # Returns
///
/// (소문자 HRP, 8비트 데이터) 튜플
pub fn decode(encoded: &str) -> WalletResult<(String, Vec<u8>)> {
    let checked = CheckedHrpstring::new::<Bech32>(encoded)
        .map_err(|e| WalletError::encoding(format!("Invalid Bech32 string: {e}")))?;

    let words = checked
        .data_part_ascii_no_checksum()
        .iter()
        .map(|&c| {
            Fe32::from_char(c.to_ascii_lowercase() as char)
                .map(Fe32::to_u8)
                .map_err(|e| WalletError::encoding(format!("Invalid data character: {e}")))
        })
        .collect::<WalletResult<Vec<u8>>>()?;

    let data = convert_bits(&words, 5, 8, false)?;
    Ok((checked.hrp().to_lowercase(), data))
}
