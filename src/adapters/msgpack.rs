// SPDX-License-Identifier: MIT OR Apache-2.0

//! MessagePack binary encoder.
//!
//! Encodes a [`Value`] tree using the original raw-type MessagePack tags:
//! strings are always written as raw (`A0..BF`, `DA`, `DB`) and never as the
//! newer `str8`/`bin` family. Every value picks the narrowest tag that holds
//! it. Multi-byte fields are big-endian. There is no decoder.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::Value;

const NIL: u8 = 0xC0;
const FALSE: u8 = 0xC2;
const TRUE: u8 = 0xC3;
const FLOAT64: u8 = 0xCB;
const UINT8: u8 = 0xCC;
const UINT16: u8 = 0xCD;
const UINT32: u8 = 0xCE;
const UINT64: u8 = 0xCF;
const INT8: u8 = 0xD0;
const INT16: u8 = 0xD1;
const INT32: u8 = 0xD2;
const INT64: u8 = 0xD3;
const RAW16: u8 = 0xDA;
const RAW32: u8 = 0xDB;
const ARRAY16: u8 = 0xDC;
const ARRAY32: u8 = 0xDD;
const MAP16: u8 = 0xDE;
const MAP32: u8 = 0xDF;
const FIXRAW: u8 = 0xA0;
const FIXARRAY: u8 = 0x90;
const FIXMAP: u8 = 0x80;

/// Encodes a value tree into a new buffer.
///
/// # Errors
///
/// Returns `ConfigError::EncodeError` if a string, array or hash is longer
/// than a 32-bit length field can describe.
///
/// # Examples
///
/// ```rust
/// use valcfg::adapters::msgpack;
/// use valcfg::domain::Value;
///
/// assert_eq!(msgpack::encode(&Value::Int(5)).unwrap(), vec![0x05]);
/// assert_eq!(msgpack::encode(&Value::from("ab")).unwrap(), vec![0xA2, b'a', b'b']);
/// ```
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_into(value, &mut out)?;
    Ok(out)
}

/// Appends the encoding of a value tree to `out`.
///
/// On error `out` may hold a partial encoding.
pub fn encode_into(value: &Value, out: &mut Vec<u8>) -> Result<()> {
    match value {
        Value::Null => out.push(NIL),
        Value::Bool(b) => out.push(if *b { TRUE } else { FALSE }),
        Value::Int(i) => write_int(*i, out),
        Value::UInt(u) => write_uint(*u, out),
        Value::Float(f) => {
            out.push(FLOAT64);
            out.extend_from_slice(&f.to_be_bytes());
        }
        Value::Str(s) => write_raw(s, out)?,
        Value::Array(items) => {
            write_header(items.len(), FIXARRAY, ARRAY16, ARRAY32, "array", out)?;
            for item in items {
                encode_into(item, out)?;
            }
        }
        Value::Hash(hash) => {
            write_header(hash.len(), FIXMAP, MAP16, MAP32, "hash", out)?;
            for (key, item) in hash {
                write_raw(key, out)?;
                encode_into(item, out)?;
            }
        }
    }
    Ok(())
}

fn write_int(i: i64, out: &mut Vec<u8>) {
    if (-32..=127).contains(&i) {
        // Positive and negative fixint share the two's-complement low byte.
        out.push(i as i8 as u8);
    } else if let Ok(v) = i8::try_from(i) {
        out.push(INT8);
        out.extend_from_slice(&v.to_be_bytes());
    } else if let Ok(v) = i16::try_from(i) {
        out.push(INT16);
        out.extend_from_slice(&v.to_be_bytes());
    } else if let Ok(v) = i32::try_from(i) {
        out.push(INT32);
        out.extend_from_slice(&v.to_be_bytes());
    } else {
        out.push(INT64);
        out.extend_from_slice(&i.to_be_bytes());
    }
}

fn write_uint(u: u64, out: &mut Vec<u8>) {
    if u <= 127 {
        out.push(u as u8);
    } else if let Ok(v) = u8::try_from(u) {
        out.push(UINT8);
        out.push(v);
    } else if let Ok(v) = u16::try_from(u) {
        out.push(UINT16);
        out.extend_from_slice(&v.to_be_bytes());
    } else if let Ok(v) = u32::try_from(u) {
        out.push(UINT32);
        out.extend_from_slice(&v.to_be_bytes());
    } else {
        out.push(UINT64);
        out.extend_from_slice(&u.to_be_bytes());
    }
}

fn write_raw(s: &str, out: &mut Vec<u8>) -> Result<()> {
    let bytes = s.as_bytes();
    if bytes.len() <= 31 {
        out.push(FIXRAW | bytes.len() as u8);
    } else {
        write_long_length(bytes.len(), RAW16, RAW32, "string", out)?;
    }
    out.extend_from_slice(bytes);
    Ok(())
}

fn write_header(
    len: usize,
    fix: u8,
    tag16: u8,
    tag32: u8,
    what: &str,
    out: &mut Vec<u8>,
) -> Result<()> {
    if len <= 15 {
        out.push(fix | len as u8);
        Ok(())
    } else {
        write_long_length(len, tag16, tag32, what, out)
    }
}

fn write_long_length(len: usize, tag16: u8, tag32: u8, what: &str, out: &mut Vec<u8>) -> Result<()> {
    if let Ok(n) = u16::try_from(len) {
        out.push(tag16);
        out.extend_from_slice(&n.to_be_bytes());
    } else if let Ok(n) = u32::try_from(len) {
        out.push(tag32);
        out.extend_from_slice(&n.to_be_bytes());
    } else {
        return Err(ConfigError::EncodeError {
            message: format!("{} of length {} exceeds the 32-bit limit", what, len),
        });
    }
    Ok(())
}
