// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed extraction from [`Value`].
//!
//! [`FromValue`] backs the strict casts (`Value::is`, `Value::cast`) and the
//! lossy coercions (`Value::coerce_to`). Coercion is total: a value that
//! cannot be converted yields the target type's default instead of an error,
//! which keeps configuration reads robust against partially invalid files.

use crate::adapters::json;
use crate::domain::value::{Array, Hash, Value};
use std::str::FromStr;

/// A type that can be extracted from a [`Value`].
pub trait FromValue: Sized {
    /// Name used in `TypeMismatch` errors.
    const TYPE_NAME: &'static str;

    /// Strict conversion: only the variant this type maps to, and only if it fits.
    fn cast(value: &Value) -> Option<Self>;

    /// Lossy conversion that never fails.
    fn coerce(value: &Value) -> Self;

    /// Returns true if [`cast`](Self::cast) would succeed.
    fn matches(value: &Value) -> bool {
        Self::cast(value).is_some()
    }
}

/// Parses a number out of a string, tolerating surrounding whitespace.
///
/// Falls back to a float parse (truncated by `from_f64`) so that `"3.7"`
/// coerces to `3` for integer targets. Anything else yields zero.
fn parse_lenient<T>(s: &str, from_f64: fn(f64) -> T) -> T
where
    T: FromStr + Default,
{
    let trimmed = s.trim();
    trimmed
        .parse::<T>()
        .ok()
        .or_else(|| {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(from_f64)
        })
        .unwrap_or_default()
}

macro_rules! impl_signed {
    ($($t:ty),*) => {
        $(impl FromValue for $t {
            const TYPE_NAME: &'static str = stringify!($t);

            fn cast(value: &Value) -> Option<Self> {
                match value {
                    Value::Int(n) => <$t>::try_from(*n).ok(),
                    _ => None,
                }
            }

            fn coerce(value: &Value) -> Self {
                match value {
                    Value::Int(n) => *n as $t,
                    Value::UInt(n) => *n as $t,
                    Value::Float(f) => *f as $t,
                    Value::Bool(b) => *b as $t,
                    Value::Str(s) => parse_lenient(s, |f| f as $t),
                    _ => 0,
                }
            }
        })*
    };
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {
        $(impl FromValue for $t {
            const TYPE_NAME: &'static str = stringify!($t);

            fn cast(value: &Value) -> Option<Self> {
                match value {
                    Value::UInt(n) => <$t>::try_from(*n).ok(),
                    _ => None,
                }
            }

            fn coerce(value: &Value) -> Self {
                match value {
                    Value::Int(n) => *n as $t,
                    Value::UInt(n) => *n as $t,
                    Value::Float(f) => *f as $t,
                    Value::Bool(b) => *b as $t,
                    Value::Str(s) => parse_lenient(s, |f| f as $t),
                    _ => 0,
                }
            }
        })*
    };
}

macro_rules! impl_float {
    ($($t:ty),*) => {
        $(impl FromValue for $t {
            const TYPE_NAME: &'static str = stringify!($t);

            fn cast(value: &Value) -> Option<Self> {
                match value {
                    Value::Float(f) => Some(*f as $t),
                    _ => None,
                }
            }

            fn coerce(value: &Value) -> Self {
                match value {
                    Value::Int(n) => *n as $t,
                    Value::UInt(n) => *n as $t,
                    Value::Float(f) => *f as $t,
                    Value::Bool(b) => u8::from(*b) as $t,
                    Value::Str(s) => parse_lenient(s, |f| f as $t),
                    _ => 0.0,
                }
            }
        })*
    };
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u8, u16, u32, u64, usize);
impl_float!(f32, f64);

impl FromValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn cast(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn coerce(value: &Value) -> Self {
        match value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::UInt(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !(s.is_empty() || s == "0" || s == "false"),
            Value::Array(_) | Value::Hash(_) => true,
        }
    }
}

impl FromValue for String {
    const TYPE_NAME: &'static str = "string";

    fn cast(value: &Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn coerce(value: &Value) -> Self {
        match value {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::UInt(n) => n.to_string(),
            Value::Float(f) => json::format_float(*f),
            Value::Str(s) => s.clone(),
            Value::Array(_) | Value::Hash(_) => value.to_json(),
        }
    }
}

impl FromValue for Value {
    const TYPE_NAME: &'static str = "value";

    fn cast(value: &Value) -> Option<Self> {
        Some(value.clone())
    }

    fn coerce(value: &Value) -> Self {
        value.clone()
    }
}

impl FromValue for Array {
    const TYPE_NAME: &'static str = "array";

    fn cast(value: &Value) -> Option<Self> {
        value.as_array().cloned()
    }

    fn coerce(value: &Value) -> Self {
        Self::cast(value).unwrap_or_default()
    }
}

impl FromValue for Hash {
    const TYPE_NAME: &'static str = "hash";

    fn cast(value: &Value) -> Option<Self> {
        value.as_hash().cloned()
    }

    fn coerce(value: &Value) -> Self {
        Self::cast(value).unwrap_or_default()
    }
}
