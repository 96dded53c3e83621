// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dynamic value type.
//!
//! [`Value`] is a closed tagged union covering everything a configuration file
//! or wire message can hold. It converts to and from the JSON text codec and
//! exports to the MessagePack binary codec. Coercions between basic types go
//! through the [`FromValue`] trait.

use crate::adapters::{json, msgpack};
use crate::domain::coerce::FromValue;
use crate::domain::errors::{ConfigError, Result};
use crate::domain::unicode;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

/// An ordered sequence of values.
pub type Array = Vec<Value>;

/// A key-ordered mapping of strings to values.
///
/// Backed by a `BTreeMap`, so iteration and serialization are always in
/// lexicographic key order.
pub type Hash = BTreeMap<String, Value>;

static NULL: Value = Value::Null;

/// A dynamically typed value.
///
/// All signed integers share the `Int` variant and all unsigned integers the
/// `UInt` variant; the codecs choose wire widths when encoding.
///
/// Equality is defined on the packed JSON form, so values that serialize to
/// the same text compare equal even when their variants differ:
///
/// ```
/// use valcfg::domain::Value;
///
/// assert_eq!(Value::Int(1), Value::UInt(1));
/// assert_eq!(Value::Float(f64::NAN), Value::Null);
/// assert_ne!(Value::from("1"), Value::Int(1));
/// ```
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A double-precision float.
    Float(f64),
    /// A UTF-8 string.
    Str(String),
    /// An ordered array of values.
    Array(Array),
    /// A key-ordered map of values.
    Hash(Hash),
}

impl Value {
    /// Creates an empty `Hash` value.
    pub fn new_hash() -> Self {
        Value::Hash(Hash::new())
    }

    /// Creates an empty `Array` value.
    pub fn new_array() -> Self {
        Value::Array(Array::new())
    }

    /// Picks the variant for a non-negative integer token.
    ///
    /// Values that fit a signed 32-bit integer are `Int`, values that only fit
    /// an unsigned 32-bit integer are `UInt`, and wider values are `Int` when
    /// they fit `i64` and `UInt` otherwise.
    ///
    /// ```
    /// use valcfg::domain::Value;
    ///
    /// assert!(matches!(Value::narrow_unsigned(300), Value::Int(300)));
    /// assert!(matches!(Value::narrow_unsigned(2_147_483_648), Value::UInt(_)));
    /// assert!(matches!(Value::narrow_unsigned(4_294_967_296), Value::Int(_)));
    /// ```
    pub fn narrow_unsigned(n: u64) -> Self {
        if n <= i32::MAX as u64 {
            Value::Int(n as i64)
        } else if n <= u32::MAX as u64 {
            Value::UInt(n)
        } else if n <= i64::MAX as u64 {
            Value::Int(n as i64)
        } else {
            Value::UInt(n)
        }
    }

    /// Creates a string value from UTF-16 code units.
    ///
    /// Decoding stops at the first unpaired surrogate; everything before it is kept.
    pub fn from_wide(units: &[u16]) -> Self {
        Value::Str(unicode::utf16_to_utf8_lossy(units))
    }

    /// Returns a short name for the stored variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Hash(_) => "hash",
        }
    }

    /// Returns true for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for `Bool`.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns true for `Str`.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    /// Returns true for `Array`.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true for `Hash`.
    pub fn is_hash(&self) -> bool {
        matches!(self, Value::Hash(_))
    }

    /// Returns true for `Int`, `UInt` and `Float`.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::UInt(_) | Value::Float(_))
    }

    /// Returns true for numbers, strings and booleans.
    pub fn is_basic(&self) -> bool {
        self.is_numeric() || self.is_string() || self.is_bool()
    }

    /// Returns true if a strict [`cast`](Self::cast) to `T` would succeed.
    ///
    /// ```
    /// use valcfg::domain::Value;
    ///
    /// assert!(Value::Int(5).is::<i32>());
    /// assert!(!Value::Int(5).is::<String>());
    /// ```
    pub fn is<T: FromValue>(&self) -> bool {
        T::matches(self)
    }

    /// Casts to `T` without coercion.
    ///
    /// Fails with [`ConfigError::TypeMismatch`] when the stored variant is not
    /// the one `T` maps to, or when the stored number does not fit `T`.
    pub fn cast<T: FromValue>(&self) -> Result<T> {
        T::cast(self).ok_or(ConfigError::TypeMismatch {
            expected: T::TYPE_NAME,
            found: self.type_name(),
        })
    }

    /// Casts to `T` without coercion, returning `default` on mismatch.
    pub fn cast_or<T: FromValue>(&self, default: T) -> T {
        T::cast(self).unwrap_or(default)
    }

    /// Converts to `T` using the lossy coercion rules.
    ///
    /// Never fails: mismatched types fall back to the type's default.
    ///
    /// ```
    /// use valcfg::domain::Value;
    ///
    /// assert_eq!(Value::from(" 42 ").coerce_to::<i32>(), 42);
    /// assert_eq!(Value::from("nope").coerce_to::<i32>(), 0);
    /// assert_eq!(Value::Int(7).coerce_to::<String>(), "7");
    /// assert!(!Value::from("false").coerce_to::<bool>());
    /// ```
    pub fn coerce_to<T: FromValue>(&self) -> T {
        T::coerce(self)
    }

    /// Returns the string slice for `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements for `Array`.
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the elements for `Array`, mutably.
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the map for `Hash`.
    pub fn as_hash(&self) -> Option<&Hash> {
        match self {
            Value::Hash(h) => Some(h),
            _ => None,
        }
    }

    /// Returns the map for `Hash`, mutably.
    pub fn as_hash_mut(&mut self) -> Option<&mut Hash> {
        match self {
            Value::Hash(h) => Some(h),
            _ => None,
        }
    }

    /// Returns true if this is a `Hash` containing `key`.
    pub fn hash_has(&self, key: &str) -> bool {
        self.as_hash().is_some_and(|h| h.contains_key(key))
    }

    /// Returns true if this is a `Hash` whose entry for `key` casts to `T`.
    pub fn hash_has_type<T: FromValue>(&self, key: &str) -> bool {
        self.as_hash()
            .and_then(|h| h.get(key))
            .is_some_and(|v| v.is::<T>())
    }

    /// Returns a copy of the entry for `key`.
    ///
    /// Returns `Null` when the key is absent or this is not a `Hash`.
    pub fn hash_get(&self, key: &str) -> Value {
        self.as_hash()
            .and_then(|h| h.get(key))
            .cloned()
            .unwrap_or_default()
    }

    /// Inserts or replaces the entry for `key`.
    ///
    /// Returns false, leaving `self` untouched, when this is not a `Hash`.
    pub fn hash_set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        match self.as_hash_mut() {
            Some(h) => {
                h.insert(key.into(), value.into());
                true
            }
            None => false,
        }
    }

    /// Appends to an `Array`. Returns false when this is not an `Array`.
    pub fn array_push(&mut self, value: impl Into<Value>) -> bool {
        match self.as_array_mut() {
            Some(a) => {
                a.push(value.into());
                true
            }
            None => false,
        }
    }

    /// Serializes to packed JSON with escaped forward slashes.
    pub fn to_json(&self) -> String {
        json::to_string(self)
    }

    /// Serializes to indented JSON without escaping forward slashes.
    pub fn to_json_pretty(&self) -> String {
        json::to_string_pretty(self)
    }

    /// Serializes to JSON with explicit options.
    pub fn to_json_with(&self, escape_slashes: bool, pretty: bool) -> String {
        json::JsonCodec::new(escape_slashes, pretty).write(self)
    }

    /// Parses a JSON document.
    pub fn from_json(text: &str) -> Result<Value> {
        json::parse(text)
    }

    /// Encodes to the MessagePack wire format.
    pub fn to_msgpack(&self) -> Result<Vec<u8>> {
        msgpack::encode(self)
    }

    /// Coerces to a string and returns its UTF-16 code units.
    pub fn to_wide(&self) -> Vec<u16> {
        unicode::utf8_to_utf16(&self.coerce_to::<String>())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.to_json() == other.to_json()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.as_hash().and_then(|h| h.get(key)).unwrap_or(&NULL)
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.as_array().and_then(|a| a.get(index)).unwrap_or(&NULL)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(v as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::UInt(v as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Value::Array(v)
    }
}

impl From<Hash> for Value {
    fn from(v: Hash) -> Self {
        Value::Hash(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Hash(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::UInt(n) => serializer.serialize_u64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Array(a) => {
                let mut seq = serializer.serialize_seq(Some(a.len()))?;
                for v in a {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
            Value::Hash(h) => {
                let mut map = serializer.serialize_map(Some(h.len()))?;
                for (k, v) in h {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value, E> {
        Ok(if v >= 0 {
            Value::narrow_unsigned(v as u64)
        } else {
            Value::Int(v)
        })
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value, E> {
        Ok(Value::narrow_unsigned(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value, E> {
        Ok(Value::Str(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Value, E> {
        Ok(Value::Str(v))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<Value, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Value, A::Error> {
        let mut array = Array::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(v) = seq.next_element()? {
            array.push(v);
        }
        Ok(Value::Array(array))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Value, A::Error> {
        let mut hash = Hash::new();
        while let Some((k, v)) = map.next_entry::<String, Value>()? {
            hash.insert(k, v);
        }
        Ok(Value::Hash(hash))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}
