// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON text codec.
//!
//! This module provides the text format used for backing files and for
//! [`Value`] equality. The parser is a strict recursive-descent parser that
//! reports the byte offset of the first error; the writer emits either a
//! packed single-line form or an indented form.

use crate::domain::errors::{ConfigError, ParseErrorKind, Result};
use crate::domain::unicode;
use crate::domain::{Hash, Value};
use crate::ports::DocumentCodec;

/// Maximum nesting of arrays and objects accepted by the parser.
const MAX_DEPTH: usize = 512;

/// Spaces per indentation level in pretty mode.
const INDENT_WIDTH: usize = 2;

/// JSON codec implementation.
///
/// The two flags only affect writing; parsing is the same for every instance.
///
/// # Examples
///
/// ```rust
/// use valcfg::adapters::JsonCodec;
/// use valcfg::domain::Value;
///
/// let mut value = Value::new_hash();
/// value.hash_set("path", "a/b");
///
/// assert_eq!(JsonCodec::packed().write(&value), r#"{"path":"a\/b"}"#);
/// assert_eq!(JsonCodec::pretty().write(&value), "{\n  \"path\": \"a/b\"\n}");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonCodec {
    escape_slashes: bool,
    pretty: bool,
}

impl JsonCodec {
    /// Creates a codec with explicit writer options.
    pub fn new(escape_slashes: bool, pretty: bool) -> Self {
        JsonCodec {
            escape_slashes,
            pretty,
        }
    }

    /// Single-line output with `/` escaped. This is the form used for equality.
    pub fn packed() -> Self {
        Self::new(true, false)
    }

    /// Indented output without slash escaping. This is the form used for backing files.
    pub fn pretty() -> Self {
        Self::new(false, true)
    }

    /// Sets whether `/` is written as `\/`.
    pub fn with_escape_slashes(mut self, escape_slashes: bool) -> Self {
        self.escape_slashes = escape_slashes;
        self
    }

    /// Sets whether output is indented.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Returns true if `/` is escaped on output.
    pub fn escapes_slashes(&self) -> bool {
        self.escape_slashes
    }

    /// Returns true if output is indented.
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Serializes a value tree.
    pub fn write(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write_value(value, 0, false, &mut out);
        out
    }

    fn newline(&self, depth: usize, out: &mut String) {
        out.push('\n');
        out.extend(std::iter::repeat(' ').take(depth * INDENT_WIDTH));
    }

    fn write_value(&self, value: &Value, depth: usize, has_own_line: bool, out: &mut String) {
        if self.pretty && has_own_line {
            self.newline(depth, out);
        }
        match value {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Int(i) => out.push_str(&i.to_string()),
            Value::UInt(u) => out.push_str(&u.to_string()),
            Value::Float(f) => out.push_str(&format_float(*f)),
            Value::Str(s) => self.write_string(s, out),
            Value::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    self.write_value(item, depth + 1, true, out);
                }
                if self.pretty {
                    self.newline(depth, out);
                }
                out.push(']');
            }
            Value::Hash(hash) => self.write_hash(hash, depth, out),
        }
    }

    fn write_hash(&self, hash: &Hash, depth: usize, out: &mut String) {
        out.push('{');
        for (i, (key, item)) in hash.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            if self.pretty {
                self.newline(depth + 1, out);
            }
            self.write_string(key, out);
            out.push(':');
            if self.pretty {
                out.push(' ');
            }
            self.write_value(item, depth + 1, false, out);
        }
        if self.pretty {
            self.newline(depth, out);
        }
        out.push('}');
    }

    fn write_string(&self, s: &str, out: &mut String) {
        out.push('"');
        for c in s.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '/' if self.escape_slashes => out.push_str("\\/"),
                '\u{8}' => out.push_str("\\b"),
                '\u{c}' => out.push_str("\\f"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                _ => out.push(c),
            }
        }
        out.push('"');
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::packed()
    }
}

impl DocumentCodec for JsonCodec {
    fn name(&self) -> &str {
        "json"
    }

    fn parse(&self, content: &str) -> Result<Value> {
        parse(content)
    }

    fn render(&self, value: &Value) -> Result<String> {
        Ok(self.write(value))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}

/// Parses a single JSON document.
///
/// # Errors
///
/// Returns `ConfigError::ParseError` with the byte offset of the first
/// problem. Nothing is returned for a partially valid document.
///
/// # Examples
///
/// ```rust
/// use valcfg::adapters::json;
/// use valcfg::domain::Value;
///
/// let value = json::parse(r#"{"n": 300, "big": 2147483648}"#).unwrap();
/// assert!(matches!(value["n"], Value::Int(300)));
/// assert!(matches!(value["big"], Value::UInt(2147483648)));
///
/// assert!(json::parse("[1, 2,]").is_err());
/// ```
pub fn parse(text: &str) -> Result<Value> {
    Parser::new(text).parse_document()
}

/// Serializes to packed JSON with slashes escaped.
pub fn to_string(value: &Value) -> String {
    JsonCodec::packed().write(value)
}

/// Serializes to indented JSON without slash escaping.
pub fn to_string_pretty(value: &Value) -> String {
    JsonCodec::pretty().write(value)
}

/// Formats a float the way the writer does.
///
/// Shortest round-trip form, with a trailing `.0` dropped so integral values
/// print as integers. Non-finite values print as `null`.
///
/// ```rust
/// use valcfg::adapters::json::format_float;
///
/// assert_eq!(format_float(1000.0), "1000");
/// assert_eq!(format_float(0.1), "0.1");
/// assert_eq!(format_float(f64::NAN), "null");
/// ```
pub fn format_float(f: f64) -> String {
    if !f.is_finite() {
        return "null".to_string();
    }
    let mut s = format!("{:?}", f);
    if s.ends_with(".0") && s != "-0.0" {
        s.truncate(s.len() - 2);
    }
    s
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Parser {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ConfigError {
        ConfigError::parse(self.pos, kind)
    }

    /// Error for whatever sits at the current position.
    fn unexpected(&self) -> ConfigError {
        match self.text[self.pos..].chars().next() {
            Some(c) => self.error(ParseErrorKind::UnexpectedCharacter(c)),
            None => self.error(ParseErrorKind::UnexpectedEnd),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r' | 0x0C) = self.peek() {
            self.pos += 1;
        }
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn parse_document(mut self) -> Result<Value> {
        self.skip_whitespace();
        if self.peek().is_none() {
            return Err(self.error(ParseErrorKind::EmptyDocument));
        }
        let value = self.parse_value(0)?;
        self.skip_whitespace();
        if self.pos < self.bytes.len() {
            return Err(self.error(ParseErrorKind::TrailingCharacters));
        }
        Ok(value)
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'{') => self.parse_object(depth),
            Some(b'[') => self.parse_array(depth),
            Some(b'"') => Ok(Value::Str(self.parse_string()?)),
            Some(b't') => self.parse_literal("true", Value::Bool(true)),
            Some(b'f') => self.parse_literal("false", Value::Bool(false)),
            Some(b'n') => self.parse_literal("null", Value::Null),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            _ => Err(self.unexpected()),
        }
    }

    fn enter(&self, depth: usize) -> Result<usize> {
        if depth >= MAX_DEPTH {
            return Err(self.error(ParseErrorKind::NestingTooDeep));
        }
        Ok(depth + 1)
    }

    fn parse_object(&mut self, depth: usize) -> Result<Value> {
        let depth = self.enter(depth)?;
        self.pos += 1;
        let mut hash = Hash::new();

        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(Value::Hash(hash));
        }

        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.unexpected());
            }
            let key = self.parse_string()?;
            self.skip_whitespace();
            self.expect(b':')?;
            let value = self.parse_value(depth)?;
            hash.insert(key, value);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(Value::Hash(hash));
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value> {
        let depth = self.enter(depth)?;
        self.pos += 1;
        let mut items = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_value(depth)?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    return Ok(Value::Array(items));
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn parse_literal(&mut self, word: &str, value: Value) -> Result<Value> {
        for &b in word.as_bytes() {
            if self.peek() != Some(b) {
                return Err(self.unexpected());
            }
            self.pos += 1;
        }
        Ok(value)
    }

    /// Parses a string starting at the opening quote.
    fn parse_string(&mut self) -> Result<String> {
        self.pos += 1;
        let mut out = String::new();
        loop {
            // Runs between quotes and backslashes are copied whole; both
            // delimiters are ASCII so the slice boundaries are char boundaries.
            let start = self.pos;
            while let Some(b) = self.peek() {
                if b == b'"' || b == b'\\' {
                    break;
                }
                self.pos += 1;
            }
            out.push_str(&self.text[start..self.pos]);

            match self.peek() {
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    self.pos += 1;
                    self.parse_escape(&mut out)?;
                }
                _ => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<()> {
        let c = match self.text[self.pos..].chars().next() {
            Some(c) => c,
            None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
        };
        let simple = match c {
            '"' => Some('"'),
            '\\' => Some('\\'),
            '/' => Some('/'),
            'b' => Some('\u{8}'),
            'f' => Some('\u{c}'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            'u' => None,
            other => return Err(self.error(ParseErrorKind::InvalidEscape(other))),
        };
        if let Some(ch) = simple {
            self.pos += 1;
            out.push(ch);
            return Ok(());
        }

        let escape_start = self.pos - 1;
        self.pos += 1;
        let unit = self.parse_hex4()?;
        let code_point = if unicode::is_high_surrogate(unit) {
            if self.peek() != Some(b'\\') || self.bytes.get(self.pos + 1) != Some(&b'u') {
                return Err(self.error(ParseErrorKind::UnpairedSurrogate));
            }
            self.pos += 2;
            let low = self.parse_hex4()?;
            if !unicode::is_low_surrogate(low) {
                return Err(self.error(ParseErrorKind::UnpairedSurrogate));
            }
            unicode::combine_surrogates(unit, low)
                .map_err(|_| ConfigError::parse(escape_start, ParseErrorKind::UnpairedSurrogate))?
        } else if unicode::is_low_surrogate(unit) {
            return Err(ConfigError::parse(
                escape_start,
                ParseErrorKind::UnpairedSurrogate,
            ));
        } else {
            unit
        };

        unicode::encode_utf8(code_point, out)
            .map_err(|_| ConfigError::parse(escape_start, ParseErrorKind::InvalidUnicodeEscape))
    }

    fn parse_hex4(&mut self) -> Result<u32> {
        let mut unit = 0u32;
        for _ in 0..4 {
            let digit = match self.peek() {
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
                Some(b) => match (b as char).to_digit(16) {
                    Some(d) => d,
                    None => return Err(self.error(ParseErrorKind::InvalidUnicodeEscape)),
                },
            };
            unit = unit * 16 + digit;
            self.pos += 1;
        }
        Ok(unit)
    }

    fn consume_digits(&mut self) -> Result<()> {
        match self.peek() {
            Some(b'0'..=b'9') => {}
            _ => return Err(self.unexpected()),
        }
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
        Ok(())
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        let negative = self.peek() == Some(b'-');
        if negative {
            self.pos += 1;
        }

        if self.peek() == Some(b'0') {
            self.pos += 1;
        } else {
            self.consume_digits()?;
        }

        let mut is_float = false;
        if self.peek() == Some(b'.') {
            is_float = true;
            self.pos += 1;
            self.consume_digits()?;
        }
        if let Some(b'e' | b'E') = self.peek() {
            is_float = true;
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
            }
            self.consume_digits()?;
        }

        let token = &self.text[start..self.pos];
        if !is_float {
            if negative {
                if let Ok(i) = token.parse::<i64>() {
                    return Ok(Value::Int(i));
                }
            } else if let Ok(u) = token.parse::<u64>() {
                return Ok(Value::narrow_unsigned(u));
            }
        }

        token
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::Float)
            .ok_or_else(|| ConfigError::parse(start, ParseErrorKind::InvalidNumber))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_err(text: &str) -> (usize, ParseErrorKind) {
        match parse(text) {
            Err(ConfigError::ParseError { offset, kind }) => (offset, kind),
            other => panic!("expected parse error for {:?}, got {:?}", text, other),
        }
    }

    #[test]
    fn test_parse_scalars() {
        assert!(matches!(parse("null").unwrap(), Value::Null));
        assert!(matches!(parse("true").unwrap(), Value::Bool(true)));
        assert!(matches!(parse(" false ").unwrap(), Value::Bool(false)));
        assert!(matches!(parse("\"hi\"").unwrap(), Value::Str(ref s) if s == "hi"));
        assert!(matches!(parse("-7").unwrap(), Value::Int(-7)));
        assert!(matches!(parse("2.5").unwrap(), Value::Float(f) if f == 2.5));
        assert!(matches!(parse("1e3").unwrap(), Value::Float(f) if f == 1000.0));
    }

    #[test]
    fn test_integer_typing() {
        assert!(matches!(parse("300").unwrap(), Value::Int(300)));
        assert!(matches!(parse("2147483647").unwrap(), Value::Int(2147483647)));
        assert!(matches!(parse("2147483648").unwrap(), Value::UInt(2147483648)));
        assert!(matches!(parse("4294967295").unwrap(), Value::UInt(4294967295)));
        assert!(matches!(parse("4294967296").unwrap(), Value::Int(4294967296)));
        assert!(matches!(
            parse("18446744073709551615").unwrap(),
            Value::UInt(u64::MAX)
        ));
        assert!(matches!(
            parse("-9223372036854775808").unwrap(),
            Value::Int(i64::MIN)
        ));
    }

    #[test]
    fn test_integer_overflow_falls_back_to_float() {
        assert!(matches!(parse("18446744073709551616").unwrap(), Value::Float(_)));
        assert!(matches!(parse("-9223372036854775809").unwrap(), Value::Float(_)));
    }

    #[test]
    fn test_parse_nested() {
        let value = parse(r#"{"a": [1, {"b": null}], "c": {}}"#).unwrap();
        assert_eq!(value["a"][0], Value::Int(1));
        assert!(value["a"][1]["b"].is_null());
        assert!(value["c"].is_hash());
        assert_eq!(value.to_json(), r#"{"a":[1,{"b":null}],"c":{}}"#);
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let value = parse(r#"{"k": 1, "k": 2}"#).unwrap();
        assert_eq!(value["k"], Value::Int(2));
    }

    #[test]
    fn test_string_escapes() {
        let value = parse(r#""a\"b\\c\/d\b\f\n\r\t""#).unwrap();
        assert_eq!(value.as_str(), Some("a\"b\\c/d\u{8}\u{c}\n\r\t"));
    }

    #[test]
    fn test_unicode_escapes() {
        assert_eq!(parse(r#""\u00e9""#).unwrap().as_str(), Some("\u{e9}"));
        assert_eq!(parse(r#""\u20AC""#).unwrap().as_str(), Some("\u{20ac}"));
        assert_eq!(parse(r#""\uD834\uDD1E""#).unwrap().as_str(), Some("\u{1d11e}"));
    }

    #[test]
    fn test_raw_utf8_and_control_bytes_accepted() {
        assert_eq!(parse("\"héllo\"").unwrap().as_str(), Some("héllo"));
        assert_eq!(parse("\"a\u{1}b\"").unwrap().as_str(), Some("a\u{1}b"));
    }

    #[test]
    fn test_surrogate_errors() {
        let (_, kind) = parse_err(r#""\uD834""#);
        assert_eq!(kind, ParseErrorKind::UnpairedSurrogate);

        let (_, kind) = parse_err(r#""\uD834A""#);
        assert_eq!(kind, ParseErrorKind::UnpairedSurrogate);

        let (offset, kind) = parse_err(r#""\uDD1E""#);
        assert_eq!(kind, ParseErrorKind::UnpairedSurrogate);
        assert_eq!(offset, 1);
    }

    #[test]
    fn test_bad_escapes() {
        assert_eq!(parse_err(r#""\q""#), (2, ParseErrorKind::InvalidEscape('q')));
        assert_eq!(
            parse_err(r#""\u12G4""#),
            (5, ParseErrorKind::InvalidUnicodeEscape)
        );
    }

    #[test]
    fn test_structural_errors() {
        assert_eq!(parse_err(""), (0, ParseErrorKind::EmptyDocument));
        assert_eq!(parse_err("   "), (3, ParseErrorKind::EmptyDocument));
        assert_eq!(parse_err("[1 2]"), (3, ParseErrorKind::UnexpectedCharacter('2')));
        assert_eq!(parse_err("[1,]"), (3, ParseErrorKind::UnexpectedCharacter(']')));
        assert_eq!(parse_err(r#"{"a":1,}"#), (7, ParseErrorKind::UnexpectedCharacter('}')));
        assert_eq!(parse_err(r#"{"a" 1}"#), (5, ParseErrorKind::UnexpectedCharacter('1')));
        assert_eq!(parse_err("[1,"), (3, ParseErrorKind::UnexpectedEnd));
        assert_eq!(parse_err("\"abc"), (4, ParseErrorKind::UnexpectedEnd));
        assert_eq!(parse_err("tru"), (3, ParseErrorKind::UnexpectedEnd));
        assert_eq!(parse_err("nul1"), (3, ParseErrorKind::UnexpectedCharacter('1')));
        assert_eq!(parse_err("1 2"), (2, ParseErrorKind::TrailingCharacters));
        assert_eq!(parse_err("{} x"), (3, ParseErrorKind::TrailingCharacters));
    }

    #[test]
    fn test_number_grammar_errors() {
        assert_eq!(parse_err("-"), (1, ParseErrorKind::UnexpectedEnd));
        assert_eq!(parse_err("1."), (2, ParseErrorKind::UnexpectedEnd));
        assert_eq!(parse_err("1.e5"), (2, ParseErrorKind::UnexpectedCharacter('e')));
        assert_eq!(parse_err("01"), (1, ParseErrorKind::TrailingCharacters));
        assert_eq!(parse_err("+1"), (0, ParseErrorKind::UnexpectedCharacter('+')));
        assert_eq!(parse_err("[1e400]"), (1, ParseErrorKind::InvalidNumber));
        assert_eq!(parse_err("-1e400"), (0, ParseErrorKind::InvalidNumber));
        assert!(matches!(parse("1e308").unwrap(), Value::Float(_)));
    }

    #[test]
    fn test_nesting_limit() {
        let deep = "[".repeat(MAX_DEPTH + 1);
        let (_, kind) = parse_err(&deep);
        assert_eq!(kind, ParseErrorKind::NestingTooDeep);

        let ok = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse(&ok).is_ok());
    }

    #[test]
    fn test_form_feed_is_whitespace() {
        assert_eq!(parse("\u{c}[1]\u{c}").unwrap(), parse("[1]").unwrap());
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(1000.0), "1000");
        assert_eq!(format_float(161.8), "161.8");
        assert_eq!(format_float(1.25e-2), "0.0125");
        assert_eq!(format_float(-0.0), "-0.0");
        assert_eq!(format_float(1e20), "1e20");
        assert_eq!(format_float(f64::INFINITY), "null");
        assert_eq!(format_float(f64::NEG_INFINITY), "null");
    }

    #[test]
    fn test_write_packed() {
        let value = parse(r#"{"b": [1, "x/y", null], "a": true}"#).unwrap();
        assert_eq!(to_string(&value), r#"{"a":true,"b":[1,"x\/y",null]}"#);
        assert_eq!(
            JsonCodec::new(false, false).write(&value),
            r#"{"a":true,"b":[1,"x/y",null]}"#
        );
    }

    #[test]
    fn test_write_escapes() {
        let value = Value::from("q\"b\\\u{8}\u{c}\n\r\t\u{1}é");
        assert_eq!(to_string(&value), "\"q\\\"b\\\\\\b\\f\\n\\r\\t\u{1}é\"");
    }

    #[test]
    fn test_write_non_finite() {
        let value: Value = vec![Value::Float(f64::NAN), Value::Float(1.5)].into();
        assert_eq!(to_string(&value), "[null,1.5]");
    }

    #[test]
    fn test_write_pretty_layout() {
        let value = parse(r#"{"x": 6, "list": [1, [2]], "nested": {"k": "v"}, "e": []}"#).unwrap();
        let expected = "{\n  \"e\": [\n  ],\n  \"list\": [\n    1,\n    [\n      2\n    ]\n  ],\n  \"nested\": {\n    \"k\": \"v\"\n  },\n  \"x\": 6\n}";
        assert_eq!(to_string_pretty(&value), expected);
    }

    #[test]
    fn test_write_pretty_scalars_and_empty() {
        assert_eq!(to_string_pretty(&Value::Int(3)), "3");
        assert_eq!(to_string_pretty(&Value::new_hash()), "{\n}");
        assert_eq!(to_string_pretty(&Value::new_array()), "[\n]");
    }

    #[test]
    fn test_pretty_output_reparses() {
        let value = parse(r#"{"a": {"b": [1, 2.5, "s/t"]}, "c": -4}"#).unwrap();
        assert_eq!(parse(&to_string_pretty(&value)).unwrap(), value);
    }

    #[test]
    fn test_deterministic_key_order() {
        let a = parse(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let b = parse(r#"{"m": 3, "z": 1, "a": 2}"#).unwrap();
        assert_eq!(to_string(&a), to_string(&b));
        assert_eq!(to_string(&a), r#"{"a":2,"m":3,"z":1}"#);
    }

    #[test]
    fn test_document_codec_impl() {
        let codec = JsonCodec::pretty();
        assert_eq!(codec.name(), "json");
        assert_eq!(codec.supported_extensions(), &["json"]);
        let value = codec.parse(r#"{"x": 6}"#).unwrap();
        assert_eq!(codec.render(&value).unwrap(), "{\n  \"x\": 6\n}");
    }

    #[test]
    fn test_builder_flags() {
        let codec = JsonCodec::default().with_pretty(true).with_escape_slashes(false);
        assert_eq!(codec, JsonCodec::pretty());
        assert!(codec.is_pretty());
        assert!(!codec.escapes_slashes());
    }
}
