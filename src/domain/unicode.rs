// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversions between UTF-8 and UTF-16/UTF-32 code units.
//!
//! Used by the wide-string coercions on [`Value`](crate::domain::Value) and by
//! the `\uXXXX` escape handling of the JSON codec.

use crate::domain::errors::{ConfigError, Result};

const HIGH_SURROGATE_START: u32 = 0xD800;
const HIGH_SURROGATE_END: u32 = 0xDBFF;
const LOW_SURROGATE_START: u32 = 0xDC00;
const LOW_SURROGATE_END: u32 = 0xDFFF;
const SUPPLEMENTARY_START: u32 = 0x10000;

/// Returns true if `unit` is a UTF-16 high (leading) surrogate.
pub fn is_high_surrogate(unit: u32) -> bool {
    (HIGH_SURROGATE_START..=HIGH_SURROGATE_END).contains(&unit)
}

/// Returns true if `unit` is a UTF-16 low (trailing) surrogate.
pub fn is_low_surrogate(unit: u32) -> bool {
    (LOW_SURROGATE_START..=LOW_SURROGATE_END).contains(&unit)
}

/// Combines a surrogate pair into the code point it encodes.
///
/// # Examples
///
/// ```
/// use valcfg::domain::unicode::combine_surrogates;
///
/// assert_eq!(combine_surrogates(0xD83D, 0xDE00).unwrap(), 0x1F600);
/// assert!(combine_surrogates(0xDC00, 0xD800).is_err());
/// ```
pub fn combine_surrogates(high: u32, low: u32) -> Result<u32> {
    if !is_high_surrogate(high) || !is_low_surrogate(low) {
        return Err(ConfigError::UnicodeError {
            message: format!("invalid surrogate pair {:#06X} {:#06X}", high, low),
        });
    }
    Ok(SUPPLEMENTARY_START + ((high - HIGH_SURROGATE_START) << 10) + (low - LOW_SURROGATE_START))
}

/// Appends the UTF-8 encoding of `code_point` to `out`.
///
/// Fails for surrogate code points and values above U+10FFFF, neither of
/// which can appear in a Rust `String`.
pub fn encode_utf8(code_point: u32, out: &mut String) -> Result<()> {
    let c = char::from_u32(code_point).ok_or_else(|| ConfigError::UnicodeError {
        message: format!("{:#X} is not a unicode scalar value", code_point),
    })?;
    out.push(c);
    Ok(())
}

/// Converts UTF-16 code units to a UTF-8 string.
///
/// Surrogates must come in complete high/low pairs.
pub fn utf16_to_utf8(units: &[u16]) -> Result<String> {
    char::decode_utf16(units.iter().copied())
        .map(|r| {
            r.map_err(|e| ConfigError::UnicodeError {
                message: format!("unpaired surrogate {:#06X}", e.unpaired_surrogate()),
            })
        })
        .collect()
}

/// Converts UTF-16 code units to UTF-8, stopping at the first invalid unit.
///
/// Everything decoded up to the error is kept.
pub fn utf16_to_utf8_lossy(units: &[u16]) -> String {
    char::decode_utf16(units.iter().copied())
        .map_while(|r| r.ok())
        .collect()
}

/// Converts a UTF-8 string to UTF-16 code units.
pub fn utf8_to_utf16(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Converts UTF-32 code points to a UTF-8 string.
pub fn utf32_to_utf8(code_points: &[u32]) -> Result<String> {
    let mut out = String::with_capacity(code_points.len());
    for &cp in code_points {
        encode_utf8(cp, &mut out)?;
    }
    Ok(out)
}

/// Converts a UTF-8 string to UTF-32 code points.
pub fn utf8_to_utf32(text: &str) -> Vec<u32> {
    text.chars().map(u32::from).collect()
}
